//! Viewer session handles and their outbound queues

use crate::core_model::types::{SessionId, UserId};
use crate::core_proto::RoomEvent;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use tracing::debug;

/// Bounded outbound queue for one session.
///
/// `push` never blocks: at capacity the oldest pending event is discarded.
/// Notifications are refetch hints, so dropping a stale one is safe; the
/// newer hint triggers the same refetch.
#[derive(Clone)]
pub struct SessionOutbox {
    inner: Arc<Mutex<OutboxInner>>,
    notify: Arc<Notify>,
    capacity: usize,
}

struct OutboxInner {
    queue: VecDeque<RoomEvent>,
    closed: bool,
    dropped: u64,
}

impl SessionOutbox {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(OutboxInner {
                queue: VecDeque::with_capacity(capacity),
                closed: false,
                dropped: 0,
            })),
            notify: Arc::new(Notify::new()),
            capacity: capacity.max(1),
        }
    }

    /// Enqueue an event, dropping the oldest pending one at capacity.
    /// Returns false if an event was dropped to make room.
    pub fn push(&self, event: RoomEvent) -> bool {
        let mut kept_all = true;
        {
            let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            if inner.closed {
                return false;
            }
            if inner.queue.len() >= self.capacity {
                inner.queue.pop_front();
                inner.dropped += 1;
                kept_all = false;
            }
            inner.queue.push_back(event);
        }
        self.notify.notify_one();
        kept_all
    }

    /// Receive the next event; returns `None` once the outbox is closed and
    /// drained.
    pub async fn recv(&self) -> Option<RoomEvent> {
        loop {
            {
                let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
                if let Some(event) = inner.queue.pop_front() {
                    return Some(event);
                }
                if inner.closed {
                    return None;
                }
            }
            self.notify.notified().await;
        }
    }

    /// Close the outbox, waking any pending receiver
    pub fn close(&self) {
        {
            let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            inner.closed = true;
        }
        self.notify.notify_one();
    }

    /// How many events were discarded due to a full queue
    pub fn dropped(&self) -> u64 {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).dropped
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .queue
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle to a live viewer session, shared between the connection task and
/// the room broadcaster
#[derive(Clone)]
pub struct SessionHandle {
    session_id: SessionId,
    user_id: UserId,
    outbox: SessionOutbox,
}

impl SessionHandle {
    pub fn new(user_id: UserId, queue_depth: usize) -> Self {
        Self {
            session_id: SessionId::generate(),
            user_id,
            outbox: SessionOutbox::new(queue_depth),
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn outbox(&self) -> &SessionOutbox {
        &self.outbox
    }

    /// Deliver an event to this session, best-effort
    pub fn deliver(&self, event: RoomEvent) {
        if !self.outbox.push(event) {
            debug!(session_id = %self.session_id, "Outbox full, dropped oldest notification");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_model::types::ProjectId;
    use crate::core_proto::UpdateKind;

    fn event(n: u64) -> RoomEvent {
        RoomEvent::ProjectUpdated {
            project_id: ProjectId::new(format!("p{n}")),
            kind: UpdateKind::ProjectChanged,
        }
    }

    #[tokio::test]
    async fn test_push_then_recv() {
        let outbox = SessionOutbox::new(4);
        assert!(outbox.push(event(1)));
        assert!(outbox.push(event(2)));

        let RoomEvent::ProjectUpdated { project_id, .. } = outbox.recv().await.unwrap();
        assert_eq!(project_id.0, "p1");
    }

    #[tokio::test]
    async fn test_full_queue_drops_oldest() {
        let outbox = SessionOutbox::new(2);
        assert!(outbox.push(event(1)));
        assert!(outbox.push(event(2)));
        // Third push evicts event 1
        assert!(!outbox.push(event(3)));

        assert_eq!(outbox.dropped(), 1);
        let RoomEvent::ProjectUpdated { project_id, .. } = outbox.recv().await.unwrap();
        assert_eq!(project_id.0, "p2");
        let RoomEvent::ProjectUpdated { project_id, .. } = outbox.recv().await.unwrap();
        assert_eq!(project_id.0, "p3");
    }

    #[tokio::test]
    async fn test_recv_returns_none_after_close() {
        let outbox = SessionOutbox::new(2);
        outbox.push(event(1));
        outbox.close();

        // Pending events still drain before end-of-stream
        assert!(outbox.recv().await.is_some());
        assert!(outbox.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_push_after_close_is_ignored() {
        let outbox = SessionOutbox::new(2);
        outbox.close();
        assert!(!outbox.push(event(1)));
        assert!(outbox.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_recv_wakes_on_push() {
        let outbox = SessionOutbox::new(2);
        let rx = outbox.clone();
        let waiter = tokio::spawn(async move { rx.recv().await });

        tokio::task::yield_now().await;
        outbox.push(event(7));

        let received = waiter.await.unwrap();
        assert!(received.is_some());
    }
}
