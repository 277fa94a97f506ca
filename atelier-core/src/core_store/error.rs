//! Store façade error types

use crate::core_model::project::ProjectError;
use thiserror::Error;

/// Errors surfaced by store façade operations
///
/// These map onto the service-wide taxonomy: not-found, forbidden,
/// invalid-argument, and conflict. Authentication failures happen before the
/// façade is reached and are not represented here.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Project not found")]
    ProjectNotFound,

    #[error("Comment not found")]
    CommentNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("User is not a collaborator on this project")]
    CollaboratorNotFound,

    #[error("Media item not found")]
    MediaNotFound,

    #[error("Permission denied")]
    Forbidden,

    #[error("User is already a member of this project")]
    AlreadyMember,

    #[error("Username or email already in use")]
    AlreadyRegistered,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<ProjectError> for StoreError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::AlreadyCollaborator | ProjectError::CreatorCannotCollaborate => {
                StoreError::AlreadyMember
            }
            ProjectError::NotACollaborator => StoreError::CollaboratorNotFound,
            ProjectError::MediaNotFound => StoreError::MediaNotFound,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
