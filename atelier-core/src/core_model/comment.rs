//! Comment data structures

use super::types::{CommentId, ProjectId, Timestamp, UserId};
use super::user::PublicUser;
use serde::{Deserialize, Serialize};

/// A comment on a project. Comments are immutable once created; they can only
/// be deleted (by their author or the project creator).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Unique identifier
    pub id: CommentId,

    /// Comment body (non-empty)
    pub content: String,

    /// Author of the comment
    pub author: UserId,

    /// Project this comment belongs to
    pub project: ProjectId,

    /// When the comment was posted (immutable)
    pub created_at: Timestamp,
}

impl Comment {
    pub fn new(content: String, author: UserId, project: ProjectId) -> Self {
        Comment {
            id: CommentId::generate(),
            content,
            author,
            project,
            created_at: Timestamp::now(),
        }
    }
}

/// A comment with its author resolved for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentView {
    pub id: CommentId,
    pub content: String,
    pub author: PublicUser,
    pub project: ProjectId,
    pub created_at: Timestamp,
}

impl CommentView {
    pub fn resolve(comment: Comment, author: PublicUser) -> Self {
        CommentView {
            id: comment.id,
            content: comment.content,
            author,
            project: comment.project,
            created_at: comment.created_at,
        }
    }
}
