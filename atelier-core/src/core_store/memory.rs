//! In-memory document store
//!
//! Backs the store façade with per-document get/put keyed by identifier plus
//! the membership-predicate queries the façade needs ("all projects where the
//! user is creator or collaborator", "all comments for a project"). The
//! façade's lock serializes mutations, so each read-modify-write on a
//! document is atomic from the caller's point of view.

use crate::core_model::comment::Comment;
use crate::core_model::project::Project;
use crate::core_model::types::{CommentId, ProjectId, UserId};
use crate::core_model::user::User;
use std::collections::HashMap;

/// In-process document store for users, projects, and comments
#[derive(Default)]
pub struct MemoryStore {
    users: HashMap<UserId, User>,
    projects: HashMap<ProjectId, Project>,
    comments: HashMap<CommentId, Comment>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ----- users -----

    pub fn insert_user(&mut self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    pub fn get_user(&self, user_id: &UserId) -> Option<&User> {
        self.users.get(user_id)
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<&User> {
        self.users.values().find(|u| u.email == email)
    }

    pub fn identity_taken(&self, username: &str, email: &str) -> bool {
        self.users
            .values()
            .any(|u| u.username == username || u.email == email)
    }

    // ----- projects -----

    pub fn insert_project(&mut self, project: Project) {
        self.projects.insert(project.id.clone(), project);
    }

    pub fn get_project(&self, project_id: &ProjectId) -> Option<&Project> {
        self.projects.get(project_id)
    }

    /// Write back a mutated project document
    pub fn put_project(&mut self, project: Project) {
        self.projects.insert(project.id.clone(), project);
    }

    pub fn remove_project(&mut self, project_id: &ProjectId) -> Option<Project> {
        self.projects.remove(project_id)
    }

    /// All projects where `user_id` is creator or collaborator
    pub fn projects_for_member(&self, user_id: &UserId) -> Vec<Project> {
        self.projects
            .values()
            .filter(|p| p.is_member(user_id))
            .cloned()
            .collect()
    }

    // ----- comments -----

    pub fn insert_comment(&mut self, comment: Comment) {
        self.comments.insert(comment.id.clone(), comment);
    }

    pub fn get_comment(&self, comment_id: &CommentId) -> Option<&Comment> {
        self.comments.get(comment_id)
    }

    pub fn remove_comment(&mut self, comment_id: &CommentId) -> Option<Comment> {
        self.comments.remove(comment_id)
    }

    pub fn comments_for_project(&self, project_id: &ProjectId) -> Vec<Comment> {
        self.comments
            .values()
            .filter(|c| &c.project == project_id)
            .cloned()
            .collect()
    }

    pub fn comment_ids_for_project(&self, project_id: &ProjectId) -> Vec<CommentId> {
        self.comments
            .values()
            .filter(|c| &c.project == project_id)
            .map(|c| c.id.clone())
            .collect()
    }
}
