//! Store façade with policy enforcement
//!
//! Every mutating or reading operation here follows the same shape: load the
//! target document, ask the access policy whether the principal may act, then
//! mutate and return the authoritative post-mutation document. No other code
//! path may touch the stored documents.

use super::error::{StoreError, StoreResult};
use super::memory::MemoryStore;
use crate::core_model::comment::{Comment, CommentView};
use crate::core_model::project::{MediaItem, Project};
use crate::core_model::types::{
    CommentId, MediaId, MediaKind, ProjectId, ProjectStatus, UserId,
};
use crate::core_model::user::{PublicUser, User};
use crate::core_policy::{authorize, Action};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Fields for creating a project
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub status: Option<ProjectStatus>,
    #[serde(default)]
    pub tags: HashSet<String>,
}

/// Partial update of project fields; `None` leaves a field untouched
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub tags: Option<HashSet<String>>,
}

/// Synchronous store façade over the document store
pub struct ProjectFacade {
    store: MemoryStore,
}

impl ProjectFacade {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    fn check(&self, principal: &UserId, project: &Project, action: Action) -> StoreResult<()> {
        if authorize(principal, project, &action).is_allowed() {
            Ok(())
        } else {
            Err(StoreError::Forbidden)
        }
    }

    fn load_project(&self, project_id: &ProjectId) -> StoreResult<Project> {
        self.store
            .get_project(project_id)
            .cloned()
            .ok_or(StoreError::ProjectNotFound)
    }

    // ----- users -----

    /// Register a new user account. The password hash is minted by the
    /// credential subsystem; this façade only stores it.
    pub fn register_user(
        &mut self,
        username: String,
        email: String,
        password_hash: String,
    ) -> StoreResult<User> {
        if username.trim().is_empty() || email.trim().is_empty() {
            return Err(StoreError::InvalidArgument(
                "username and email are required".to_string(),
            ));
        }
        if self.store.identity_taken(&username, &email) {
            return Err(StoreError::AlreadyRegistered);
        }

        let user = User::new(username, email, password_hash);
        self.store.insert_user(user.clone());
        Ok(user)
    }

    pub fn get_user(&self, user_id: &UserId) -> StoreResult<User> {
        self.store
            .get_user(user_id)
            .cloned()
            .ok_or(StoreError::UserNotFound)
    }

    pub fn find_user_by_email(&self, email: &str) -> StoreResult<User> {
        self.store
            .find_user_by_email(email)
            .cloned()
            .ok_or(StoreError::UserNotFound)
    }

    // ----- projects -----

    /// Create a project; any authenticated principal may create, and becomes
    /// the creator.
    pub fn create_project(&mut self, principal: &UserId, fields: NewProject) -> StoreResult<Project> {
        if fields.title.trim().is_empty() {
            return Err(StoreError::InvalidArgument("title is required".to_string()));
        }
        if fields.description.trim().is_empty() {
            return Err(StoreError::InvalidArgument(
                "description is required".to_string(),
            ));
        }

        let project = Project::new(
            fields.title,
            fields.description,
            principal.clone(),
            fields.status.unwrap_or_default(),
            fields.tags,
        );
        self.store.insert_project(project.clone());

        debug!(project_id = %project.id, creator = %principal, "Created project");
        Ok(project)
    }

    pub fn get_project(&self, principal: &UserId, project_id: &ProjectId) -> StoreResult<Project> {
        let project = self.load_project(project_id)?;
        self.check(principal, &project, Action::ReadProject)?;
        Ok(project)
    }

    /// Apply a partial update; only the provided fields change
    pub fn update_project(
        &mut self,
        principal: &UserId,
        project_id: &ProjectId,
        patch: ProjectPatch,
    ) -> StoreResult<Project> {
        let mut project = self.load_project(project_id)?;
        self.check(principal, &project, Action::EditProject)?;

        if let Some(title) = patch.title {
            if title.trim().is_empty() {
                return Err(StoreError::InvalidArgument("title is required".to_string()));
            }
            project.title = title;
        }
        if let Some(description) = patch.description {
            project.description = description;
        }
        if let Some(status) = patch.status {
            project.status = status;
        }
        if let Some(tags) = patch.tags {
            project.tags = tags;
        }
        project.touch();

        self.store.put_project(project.clone());
        Ok(project)
    }

    /// Delete a project and cascade deletion of its comments.
    ///
    /// The cascade is best-effort sequential: a comment that fails to delete
    /// is logged and skipped, never blocking the project deletion itself.
    pub fn delete_project(&mut self, principal: &UserId, project_id: &ProjectId) -> StoreResult<()> {
        let project = self.load_project(project_id)?;
        self.check(principal, &project, Action::DeleteProject)?;

        for comment_id in self.store.comment_ids_for_project(project_id) {
            if self.store.remove_comment(&comment_id).is_none() {
                warn!(
                    project_id = %project_id,
                    comment_id = %comment_id,
                    "Comment vanished during cascade delete; continuing"
                );
            }
        }

        self.store.remove_project(project_id);
        debug!(project_id = %project_id, "Deleted project");
        Ok(())
    }

    // ----- membership -----

    pub fn add_collaborator(
        &mut self,
        principal: &UserId,
        project_id: &ProjectId,
        target: &UserId,
    ) -> StoreResult<Project> {
        let mut project = self.load_project(project_id)?;
        self.check(principal, &project, Action::ManageMembers)?;

        // Target must resolve to a real account
        self.get_user(target)?;

        project.add_collaborator(target.clone())?;
        self.store.put_project(project.clone());

        debug!(project_id = %project_id, user = %target, "Added collaborator");
        Ok(project)
    }

    /// Add a collaborator looked up by email (the original invite flow)
    pub fn add_collaborator_by_email(
        &mut self,
        principal: &UserId,
        project_id: &ProjectId,
        email: &str,
    ) -> StoreResult<(Project, PublicUser)> {
        let target = self.find_user_by_email(email)?;
        let public = PublicUser::from(&target);
        let project = self.add_collaborator(principal, project_id, &target.id)?;
        Ok((project, public))
    }

    pub fn remove_collaborator(
        &mut self,
        principal: &UserId,
        project_id: &ProjectId,
        target: &UserId,
    ) -> StoreResult<Project> {
        let mut project = self.load_project(project_id)?;
        self.check(principal, &project, Action::ManageMembers)?;

        project.remove_collaborator(target)?;
        self.store.put_project(project.clone());

        debug!(project_id = %project_id, user = %target, "Removed collaborator");
        Ok(project)
    }

    // ----- media -----

    pub fn add_media(
        &mut self,
        principal: &UserId,
        project_id: &ProjectId,
        kind: MediaKind,
        url: String,
        caption: String,
    ) -> StoreResult<MediaItem> {
        if url.trim().is_empty() {
            return Err(StoreError::InvalidArgument(
                "media url is required".to_string(),
            ));
        }

        let mut project = self.load_project(project_id)?;
        self.check(principal, &project, Action::AddMedia)?;

        let item = MediaItem::new(kind, url, caption);
        project.add_media(item.clone());
        self.store.put_project(project);

        Ok(item)
    }

    /// Remove a media item. Gated behind the same member rule as adding
    /// media, matching how the rest of the media surface is authorized.
    pub fn remove_media(
        &mut self,
        principal: &UserId,
        project_id: &ProjectId,
        media_id: &MediaId,
    ) -> StoreResult<()> {
        let mut project = self.load_project(project_id)?;
        self.check(principal, &project, Action::AddMedia)?;

        project.remove_media(media_id)?;
        self.store.put_project(project);
        Ok(())
    }

    // ----- comments -----

    pub fn add_comment(
        &mut self,
        principal: &UserId,
        project_id: &ProjectId,
        content: String,
    ) -> StoreResult<CommentView> {
        if content.trim().is_empty() {
            return Err(StoreError::InvalidArgument(
                "comment content is required".to_string(),
            ));
        }

        let project = self.load_project(project_id)?;
        self.check(principal, &project, Action::PostComment)?;

        let author = self.get_user(principal)?;
        let comment = Comment::new(content, principal.clone(), project_id.clone());
        self.store.insert_comment(comment.clone());

        Ok(CommentView::resolve(comment, PublicUser::from(&author)))
    }

    pub fn delete_comment(&mut self, principal: &UserId, comment_id: &CommentId) -> StoreResult<()> {
        let comment = self
            .store
            .get_comment(comment_id)
            .cloned()
            .ok_or(StoreError::CommentNotFound)?;

        let project = self.load_project(&comment.project)?;
        self.check(
            principal,
            &project,
            Action::DeleteComment {
                author: comment.author.clone(),
            },
        )?;

        self.store.remove_comment(comment_id);
        Ok(())
    }

    /// Comments on a project, newest first
    pub fn list_comments(
        &self,
        principal: &UserId,
        project_id: &ProjectId,
    ) -> StoreResult<Vec<CommentView>> {
        let project = self.load_project(project_id)?;
        self.check(principal, &project, Action::ReadProject)?;

        let mut comments = self.store.comments_for_project(project_id);
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut views = Vec::with_capacity(comments.len());
        for comment in comments {
            let author = self.get_user(&comment.author)?;
            views.push(CommentView::resolve(comment, PublicUser::from(&author)));
        }
        Ok(views)
    }

    /// Projects where the principal is creator or collaborator, newest first.
    /// The membership filter itself is the authorization check.
    pub fn list_projects_for(&self, principal: &UserId) -> Vec<Project> {
        let mut projects = self.store.projects_for_member(principal);
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        projects
    }
}
