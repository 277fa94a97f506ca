//! Project data structures and membership operations

use super::types::{MediaId, MediaKind, ProjectId, ProjectStatus, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A Project is the unit of collaboration: a creator, a set of collaborators,
/// attached media, and a comment thread (comments live in their own store).
///
/// Invariant: the creator is never listed among the collaborators. The
/// authorization domain for read/comment access is exactly
/// {creator} ∪ collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier
    pub id: ProjectId,

    /// Human-readable title
    pub title: String,

    /// Longer description
    pub description: String,

    /// Lifecycle status
    pub status: ProjectStatus,

    /// Creator of the project (immutable after creation)
    pub creator: UserId,

    /// Collaborators invited by the creator (creator excluded by construction)
    pub collaborators: HashSet<UserId>,

    /// Attached media, in insertion order
    pub media: Vec<MediaItem>,

    /// Free-form tags
    pub tags: HashSet<String>,

    /// When the project was created (immutable)
    pub created_at: Timestamp,

    /// Last time the project was mutated
    pub updated_at: Timestamp,
}

/// A media attachment embedded in a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    /// Unique identifier within the project
    pub id: MediaId,

    /// Coarse classification
    pub kind: MediaKind,

    /// Stable URL handed out by blob storage
    pub url: String,

    /// Optional caption
    pub caption: String,
}

impl MediaItem {
    pub fn new(kind: MediaKind, url: String, caption: String) -> Self {
        MediaItem {
            id: MediaId::generate(),
            kind,
            url,
            caption,
        }
    }
}

impl Project {
    /// Create a new project owned by `creator`
    pub fn new(
        title: String,
        description: String,
        creator: UserId,
        status: ProjectStatus,
        tags: HashSet<String>,
    ) -> Self {
        let now = Timestamp::now();

        Project {
            id: ProjectId::generate(),
            title,
            description,
            status,
            creator,
            collaborators: HashSet::new(),
            media: Vec::new(),
            tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if a user is the creator or a collaborator
    pub fn is_member(&self, user_id: &UserId) -> bool {
        &self.creator == user_id || self.collaborators.contains(user_id)
    }

    /// The full authorization domain: {creator} ∪ collaborators
    pub fn membership(&self) -> HashSet<UserId> {
        let mut members = self.collaborators.clone();
        members.insert(self.creator.clone());
        members
    }

    /// Add a collaborator
    pub fn add_collaborator(&mut self, user_id: UserId) -> Result<(), ProjectError> {
        if user_id == self.creator {
            return Err(ProjectError::CreatorCannotCollaborate);
        }
        if !self.collaborators.insert(user_id) {
            return Err(ProjectError::AlreadyCollaborator);
        }
        self.touch();
        Ok(())
    }

    /// Remove a collaborator
    pub fn remove_collaborator(&mut self, user_id: &UserId) -> Result<(), ProjectError> {
        if !self.collaborators.remove(user_id) {
            return Err(ProjectError::NotACollaborator);
        }
        self.touch();
        Ok(())
    }

    /// Append a media item (insertion order is preserved, never reordered)
    pub fn add_media(&mut self, item: MediaItem) {
        self.media.push(item);
        self.touch();
    }

    /// Remove a media item by id
    pub fn remove_media(&mut self, media_id: &MediaId) -> Result<(), ProjectError> {
        let pos = self
            .media
            .iter()
            .position(|m| &m.id == media_id)
            .ok_or(ProjectError::MediaNotFound)?;
        self.media.remove(pos);
        self.touch();
        Ok(())
    }

    /// Refresh `updated_at`. Mutations within the same millisecond still
    /// advance the clock so `updated_at` stays strictly increasing.
    pub fn touch(&mut self) {
        let now = Timestamp::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            Timestamp::from_millis(self.updated_at.as_millis() + 1)
        };
    }
}

/// Project membership/media operation errors
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("User is already a collaborator")]
    AlreadyCollaborator,

    #[error("Creator cannot be added as a collaborator of their own project")]
    CreatorCannotCollaborate,

    #[error("User is not a collaborator")]
    NotACollaborator,

    #[error("Media item not found")]
    MediaNotFound,
}
