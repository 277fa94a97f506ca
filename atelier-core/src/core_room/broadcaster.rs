//! Room membership map and notification fan-out

use super::session::SessionHandle;
use crate::core_model::types::{ProjectId, SessionId};
use crate::core_proto::RoomEvent;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Maps each project to its currently connected viewer sessions
type RoomMap = HashMap<ProjectId, HashMap<SessionId, SessionHandle>>;

/// Per-project fan-out of change notifications.
///
/// All join/leave/notify calls on a room are ordered by the single lock over
/// the room map; rooms are independent and no cross-room lock exists.
/// Delivery is best-effort and non-blocking per recipient: a slow session's
/// outbox drops its oldest pending hint rather than delaying anyone else.
pub struct RoomBroadcaster {
    rooms: RwLock<RoomMap>,
}

impl Default for RoomBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomBroadcaster {
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Add a session to a project's room. Idempotent.
    pub async fn join(&self, session: SessionHandle, project_id: ProjectId) {
        let mut rooms = self.rooms.write().await;
        let room = rooms.entry(project_id.clone()).or_default();
        let session_id = session.session_id().clone();
        room.entry(session_id.clone()).or_insert(session);

        debug!(
            project_id = %project_id,
            session_id = %session_id,
            viewers = room.len(),
            "Session joined room"
        );
    }

    /// Remove a session from a project's room. Idempotent; an empty room is
    /// dropped from the map entirely.
    pub async fn leave(&self, session_id: &SessionId, project_id: &ProjectId) {
        let mut rooms = self.rooms.write().await;
        if let Some(room) = rooms.get_mut(project_id) {
            room.remove(session_id);
            if room.is_empty() {
                rooms.remove(project_id);
            }
        }

        debug!(
            project_id = %project_id,
            session_id = %session_id,
            "Session left room"
        );
    }

    /// Deliver `event` to every session in the room except `origin`.
    ///
    /// Failures (dead session, full outbox) are swallowed here; the mutation
    /// that triggered the notification has already succeeded.
    pub async fn notify(&self, origin: &SessionId, project_id: &ProjectId, event: RoomEvent) {
        let rooms = self.rooms.read().await;
        let Some(room) = rooms.get(project_id) else {
            return;
        };

        let mut delivered = 0;
        for (session_id, session) in room.iter() {
            if session_id == origin {
                continue;
            }
            session.deliver(event.clone());
            delivered += 1;
        }

        debug!(
            project_id = %project_id,
            origin = %origin,
            delivered,
            "Fanned out room notification"
        );
    }

    /// Remove a session from every room it had joined. Called when the
    /// underlying connection terminates, whether or not the client sent an
    /// explicit leave.
    pub async fn disconnect(&self, session_id: &SessionId) {
        let mut rooms = self.rooms.write().await;
        rooms.retain(|project_id, room| {
            if room.remove(session_id).is_some() {
                debug!(
                    project_id = %project_id,
                    session_id = %session_id,
                    "Session removed from room on disconnect"
                );
            }
            !room.is_empty()
        });

        info!(session_id = %session_id, "Session disconnected from all rooms");
    }

    /// Session ids currently in a project's room
    pub async fn room_sessions(&self, project_id: &ProjectId) -> Vec<SessionId> {
        let rooms = self.rooms.read().await;
        rooms
            .get(project_id)
            .map(|room| room.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of rooms with at least one live session
    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_model::types::UserId;
    use crate::core_proto::UpdateKind;

    fn session(name: &str) -> SessionHandle {
        SessionHandle::new(UserId::new(name.to_string()), 8)
    }

    fn update(project_id: &ProjectId) -> RoomEvent {
        RoomEvent::ProjectUpdated {
            project_id: project_id.clone(),
            kind: UpdateKind::NewComment,
        }
    }

    #[tokio::test]
    async fn test_notify_excludes_origin() {
        let rooms = RoomBroadcaster::new();
        let project = ProjectId::generate();
        let a = session("alice");
        let b = session("bob");

        rooms.join(a.clone(), project.clone()).await;
        rooms.join(b.clone(), project.clone()).await;

        rooms.notify(a.session_id(), &project, update(&project)).await;

        // Only B received the event
        assert!(a.outbox().is_empty());
        assert_eq!(b.outbox().len(), 1);
    }

    #[tokio::test]
    async fn test_join_is_idempotent() {
        let rooms = RoomBroadcaster::new();
        let project = ProjectId::generate();
        let a = session("alice");
        let b = session("bob");

        rooms.join(a.clone(), project.clone()).await;
        rooms.join(a.clone(), project.clone()).await;
        rooms.join(b.clone(), project.clone()).await;

        rooms.notify(a.session_id(), &project, update(&project)).await;

        // Double join does not double-deliver
        assert_eq!(b.outbox().len(), 1);
        assert_eq!(rooms.room_sessions(&project).await.len(), 2);
    }

    #[tokio::test]
    async fn test_leave_prunes_empty_room() {
        let rooms = RoomBroadcaster::new();
        let project = ProjectId::generate();
        let a = session("alice");

        rooms.join(a.clone(), project.clone()).await;
        assert_eq!(rooms.room_count().await, 1);

        rooms.leave(a.session_id(), &project).await;
        assert_eq!(rooms.room_count().await, 0);

        // Leaving again is a no-op
        rooms.leave(a.session_id(), &project).await;
        assert_eq!(rooms.room_count().await, 0);
    }

    #[tokio::test]
    async fn test_disconnect_removes_from_all_rooms() {
        let rooms = RoomBroadcaster::new();
        let p1 = ProjectId::generate();
        let p2 = ProjectId::generate();
        let a = session("alice");
        let b = session("bob");

        rooms.join(a.clone(), p1.clone()).await;
        rooms.join(a.clone(), p2.clone()).await;
        rooms.join(b.clone(), p1.clone()).await;

        rooms.disconnect(a.session_id()).await;

        // A is gone everywhere; empty p2 room was pruned
        assert_eq!(rooms.room_sessions(&p1).await, vec![b.session_id().clone()]);
        assert_eq!(rooms.room_count().await, 1);

        // Notifying after disconnect reaches only live sessions and does not
        // error for the remaining recipients
        rooms.notify(b.session_id(), &p1, update(&p1)).await;
        assert!(a.outbox().is_empty());
    }

    #[tokio::test]
    async fn test_notify_unknown_room_is_noop() {
        let rooms = RoomBroadcaster::new();
        let project = ProjectId::generate();
        rooms
            .notify(&SessionId::generate(), &project, update(&project))
            .await;
    }

    #[tokio::test]
    async fn test_rooms_are_independent() {
        let rooms = RoomBroadcaster::new();
        let p1 = ProjectId::generate();
        let p2 = ProjectId::generate();
        let a = session("alice");
        let b = session("bob");

        rooms.join(a.clone(), p1.clone()).await;
        rooms.join(b.clone(), p2.clone()).await;

        rooms.notify(a.session_id(), &p1, update(&p1)).await;

        // B watches a different project and hears nothing
        assert!(b.outbox().is_empty());
    }
}
