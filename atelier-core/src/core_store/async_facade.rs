//! Async wrapper around the store façade
//!
//! Wraps the synchronous [`ProjectFacade`] behind a `tokio::sync::RwLock` so
//! connection tasks can share it. The write lock serializes all mutations,
//! which also gives each per-document read-modify-write its required
//! atomicity; reads run concurrently under the read lock.

use super::error::StoreResult;
use super::facade::{NewProject, ProjectFacade, ProjectPatch};
use crate::core_model::comment::CommentView;
use crate::core_model::project::{MediaItem, Project};
use crate::core_model::types::{CommentId, MediaId, MediaKind, ProjectId, UserId};
use crate::core_model::user::{PublicUser, User};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shareable async façade
#[derive(Clone)]
pub struct AsyncProjectFacade {
    inner: Arc<RwLock<ProjectFacade>>,
}

impl AsyncProjectFacade {
    pub fn new(facade: ProjectFacade) -> Self {
        Self {
            inner: Arc::new(RwLock::new(facade)),
        }
    }

    pub async fn register_user(
        &self,
        username: String,
        email: String,
        password_hash: String,
    ) -> StoreResult<User> {
        let mut facade = self.inner.write().await;
        facade.register_user(username, email, password_hash)
    }

    pub async fn get_user(&self, user_id: &UserId) -> StoreResult<User> {
        let facade = self.inner.read().await;
        facade.get_user(user_id)
    }

    pub async fn find_user_by_email(&self, email: &str) -> StoreResult<User> {
        let facade = self.inner.read().await;
        facade.find_user_by_email(email)
    }

    pub async fn create_project(
        &self,
        principal: &UserId,
        fields: NewProject,
    ) -> StoreResult<Project> {
        let mut facade = self.inner.write().await;
        facade.create_project(principal, fields)
    }

    pub async fn get_project(
        &self,
        principal: &UserId,
        project_id: &ProjectId,
    ) -> StoreResult<Project> {
        let facade = self.inner.read().await;
        facade.get_project(principal, project_id)
    }

    pub async fn update_project(
        &self,
        principal: &UserId,
        project_id: &ProjectId,
        patch: ProjectPatch,
    ) -> StoreResult<Project> {
        let mut facade = self.inner.write().await;
        facade.update_project(principal, project_id, patch)
    }

    pub async fn delete_project(
        &self,
        principal: &UserId,
        project_id: &ProjectId,
    ) -> StoreResult<()> {
        let mut facade = self.inner.write().await;
        facade.delete_project(principal, project_id)
    }

    pub async fn add_collaborator(
        &self,
        principal: &UserId,
        project_id: &ProjectId,
        target: &UserId,
    ) -> StoreResult<Project> {
        let mut facade = self.inner.write().await;
        facade.add_collaborator(principal, project_id, target)
    }

    pub async fn add_collaborator_by_email(
        &self,
        principal: &UserId,
        project_id: &ProjectId,
        email: &str,
    ) -> StoreResult<(Project, PublicUser)> {
        let mut facade = self.inner.write().await;
        facade.add_collaborator_by_email(principal, project_id, email)
    }

    pub async fn remove_collaborator(
        &self,
        principal: &UserId,
        project_id: &ProjectId,
        target: &UserId,
    ) -> StoreResult<Project> {
        let mut facade = self.inner.write().await;
        facade.remove_collaborator(principal, project_id, target)
    }

    pub async fn add_media(
        &self,
        principal: &UserId,
        project_id: &ProjectId,
        kind: MediaKind,
        url: String,
        caption: String,
    ) -> StoreResult<MediaItem> {
        let mut facade = self.inner.write().await;
        facade.add_media(principal, project_id, kind, url, caption)
    }

    pub async fn remove_media(
        &self,
        principal: &UserId,
        project_id: &ProjectId,
        media_id: &MediaId,
    ) -> StoreResult<()> {
        let mut facade = self.inner.write().await;
        facade.remove_media(principal, project_id, media_id)
    }

    pub async fn add_comment(
        &self,
        principal: &UserId,
        project_id: &ProjectId,
        content: String,
    ) -> StoreResult<CommentView> {
        let mut facade = self.inner.write().await;
        facade.add_comment(principal, project_id, content)
    }

    pub async fn delete_comment(
        &self,
        principal: &UserId,
        comment_id: &CommentId,
    ) -> StoreResult<()> {
        let mut facade = self.inner.write().await;
        facade.delete_comment(principal, comment_id)
    }

    pub async fn list_comments(
        &self,
        principal: &UserId,
        project_id: &ProjectId,
    ) -> StoreResult<Vec<CommentView>> {
        let facade = self.inner.read().await;
        facade.list_comments(principal, project_id)
    }

    pub async fn list_projects_for(&self, principal: &UserId) -> Vec<Project> {
        let facade = self.inner.read().await;
        facade.list_projects_for(principal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_store::memory::MemoryStore;

    #[tokio::test]
    async fn test_concurrent_collaborator_adds_are_serialized() {
        let facade = AsyncProjectFacade::new(ProjectFacade::new(MemoryStore::new()));

        let creator = facade
            .register_user(
                "alice".to_string(),
                "alice@example.com".to_string(),
                "h".to_string(),
            )
            .await
            .unwrap()
            .id;
        let bob = facade
            .register_user("bob".to_string(), "bob@example.com".to_string(), "h".to_string())
            .await
            .unwrap()
            .id;

        let project = facade
            .create_project(
                &creator,
                NewProject {
                    title: "Mural".to_string(),
                    description: "d".to_string(),
                    status: None,
                    tags: Default::default(),
                },
            )
            .await
            .unwrap();

        // Two racing adds of the same collaborator: exactly one wins.
        let f1 = facade.clone();
        let f2 = facade.clone();
        let (c1, b1, p1) = (creator.clone(), bob.clone(), project.id.clone());
        let (c2, b2, p2) = (creator.clone(), bob.clone(), project.id.clone());

        let (r1, r2) = tokio::join!(
            tokio::spawn(async move { f1.add_collaborator(&c1, &p1, &b1).await }),
            tokio::spawn(async move { f2.add_collaborator(&c2, &p2, &b2).await }),
        );
        let results = [r1.unwrap(), r2.unwrap()];
        let wins = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(wins, 1);

        let loaded = facade.get_project(&creator, &project.id).await.unwrap();
        assert_eq!(loaded.collaborators.len(), 1);
    }
}
