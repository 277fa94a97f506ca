//! Change-notification protocol
//!
//! The message shapes that travel over a room channel, and the dispatch that
//! maps them onto the room broadcaster. Notifications are hints only: a peer
//! that receives `project-updated` re-fetches the authoritative state through
//! the store façade's read path. No document data ever rides the room
//! channel, so authorization stays enforced in exactly one place.

use crate::core_model::types::ProjectId;
use crate::core_room::{RoomBroadcaster, SessionHandle};
use serde::{Deserialize, Serialize};

/// What changed, so the receiver knows which resource to re-fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpdateKind {
    /// Project document changed; re-fetch the project
    ProjectChanged,
    /// A comment was posted; re-fetch the comment list
    NewComment,
}

/// Messages a client sends over its room channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    /// Start watching a project's room
    JoinProject { project_id: ProjectId },
    /// Stop watching a project's room
    LeaveProject { project_id: ProjectId },
    /// Announce a mutation the client just performed through the store façade
    ProjectUpdate {
        project_id: ProjectId,
        kind: UpdateKind,
    },
}

/// Events the server delivers to the other sessions in a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RoomEvent {
    /// A peer changed the project; carries only the refetch hint
    ProjectUpdated {
        project_id: ProjectId,
        kind: UpdateKind,
    },
}

/// Route a client message for `session` onto the broadcaster.
///
/// A `project-update` fans out to every other session in that project's room;
/// the sender never hears its own announcement.
pub async fn dispatch(rooms: &RoomBroadcaster, session: &SessionHandle, message: ClientMessage) {
    match message {
        ClientMessage::JoinProject { project_id } => {
            rooms.join(session.clone(), project_id).await;
        }
        ClientMessage::LeaveProject { project_id } => {
            rooms.leave(session.session_id(), &project_id).await;
        }
        ClientMessage::ProjectUpdate { project_id, kind } => {
            let event = RoomEvent::ProjectUpdated {
                project_id: project_id.clone(),
                kind,
            };
            rooms.notify(session.session_id(), &project_id, event).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_model::types::UserId;

    #[test]
    fn test_client_message_wire_shape() {
        let msg = ClientMessage::JoinProject {
            project_id: ProjectId::new("p1".to_string()),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"type":"join-project","project_id":"p1"}"#);

        let parsed: ClientMessage = serde_json::from_str(
            r#"{"type":"project-update","project_id":"p1","kind":"new-comment"}"#,
        )
        .unwrap();
        assert_eq!(
            parsed,
            ClientMessage::ProjectUpdate {
                project_id: ProjectId::new("p1".to_string()),
                kind: UpdateKind::NewComment,
            }
        );
    }

    #[test]
    fn test_room_event_wire_shape() {
        let event = RoomEvent::ProjectUpdated {
            project_id: ProjectId::new("p1".to_string()),
            kind: UpdateKind::ProjectChanged,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"type":"project-updated","project_id":"p1","kind":"project-changed"}"#
        );
    }

    #[tokio::test]
    async fn test_dispatch_join_update_leave() {
        let rooms = RoomBroadcaster::new();
        let project_id = ProjectId::generate();
        let a = SessionHandle::new(UserId::new("alice".to_string()), 8);
        let b = SessionHandle::new(UserId::new("bob".to_string()), 8);

        dispatch(
            &rooms,
            &a,
            ClientMessage::JoinProject {
                project_id: project_id.clone(),
            },
        )
        .await;
        dispatch(
            &rooms,
            &b,
            ClientMessage::JoinProject {
                project_id: project_id.clone(),
            },
        )
        .await;

        dispatch(
            &rooms,
            &a,
            ClientMessage::ProjectUpdate {
                project_id: project_id.clone(),
                kind: UpdateKind::NewComment,
            },
        )
        .await;

        // Only the peer hears the announcement
        assert!(a.outbox().is_empty());
        let event = b.outbox().recv().await.unwrap();
        assert_eq!(
            event,
            RoomEvent::ProjectUpdated {
                project_id: project_id.clone(),
                kind: UpdateKind::NewComment,
            }
        );

        dispatch(
            &rooms,
            &b,
            ClientMessage::LeaveProject {
                project_id: project_id.clone(),
            },
        )
        .await;
        dispatch(
            &rooms,
            &a,
            ClientMessage::ProjectUpdate {
                project_id: project_id.clone(),
                kind: UpdateKind::ProjectChanged,
            },
        )
        .await;
        assert!(b.outbox().is_empty());
    }
}
