//! Data model for users, projects, and comments

pub mod comment;
pub mod project;
pub mod types;
pub mod user;

pub use comment::{Comment, CommentView};
pub use project::{MediaItem, Project, ProjectError};
pub use types::{
    CommentId, MediaId, MediaKind, ProjectId, ProjectStatus, SessionId, Timestamp, UserId,
};
pub use user::{PublicUser, User, UserProfile};
