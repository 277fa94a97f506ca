//! Access policy for project operations
//!
//! A single pure decision function answers every "may this user do that"
//! question in the system. It takes literal (principal, project, action)
//! inputs, performs no I/O, and keeps no state, so it can be unit tested in
//! isolation and called from any transport.

use crate::core_model::project::Project;
use crate::core_model::types::UserId;

/// An operation a principal may attempt against a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ReadProject,
    EditProject,
    DeleteProject,
    ManageMembers,
    PostComment,
    AddMedia,
    /// Deleting a specific comment; carries the comment's author
    DeleteComment { author: UserId },
}

/// Policy verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }
}

/// Decide whether `principal` may perform `action` on `project`.
///
/// - ReadProject / PostComment / AddMedia: any member (creator or collaborator)
/// - EditProject / DeleteProject / ManageMembers: creator only
/// - DeleteComment: the comment's author or the project creator
pub fn authorize(principal: &UserId, project: &Project, action: &Action) -> Decision {
    let allowed = match action {
        Action::ReadProject | Action::PostComment | Action::AddMedia => {
            project.is_member(principal)
        }
        Action::EditProject | Action::DeleteProject | Action::ManageMembers => {
            principal == &project.creator
        }
        Action::DeleteComment { author } => {
            principal == author || principal == &project.creator
        }
    };

    if allowed {
        Decision::Allowed
    } else {
        Decision::Denied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_model::types::ProjectStatus;
    use std::collections::HashSet;

    fn project_with_collaborator(creator: &UserId, collaborator: &UserId) -> Project {
        let mut project = Project::new(
            "Test".to_string(),
            "Test project".to_string(),
            creator.clone(),
            ProjectStatus::default(),
            HashSet::new(),
        );
        project.add_collaborator(collaborator.clone()).unwrap();
        project
    }

    fn all_plain_actions() -> Vec<Action> {
        vec![
            Action::ReadProject,
            Action::EditProject,
            Action::DeleteProject,
            Action::ManageMembers,
            Action::PostComment,
            Action::AddMedia,
        ]
    }

    #[test]
    fn test_creator_passes_every_action() {
        let creator = UserId::new("alice".to_string());
        let bob = UserId::new("bob".to_string());
        let project = project_with_collaborator(&creator, &bob);

        for action in all_plain_actions() {
            assert_eq!(
                authorize(&creator, &project, &action),
                Decision::Allowed,
                "creator denied {:?}",
                action
            );
        }
        assert_eq!(
            authorize(
                &creator,
                &project,
                &Action::DeleteComment { author: bob.clone() }
            ),
            Decision::Allowed
        );
    }

    #[test]
    fn test_collaborator_scope() {
        let creator = UserId::new("alice".to_string());
        let bob = UserId::new("bob".to_string());
        let project = project_with_collaborator(&creator, &bob);

        assert!(authorize(&bob, &project, &Action::ReadProject).is_allowed());
        assert!(authorize(&bob, &project, &Action::PostComment).is_allowed());
        assert!(authorize(&bob, &project, &Action::AddMedia).is_allowed());

        assert_eq!(authorize(&bob, &project, &Action::EditProject), Decision::Denied);
        assert_eq!(authorize(&bob, &project, &Action::DeleteProject), Decision::Denied);
        assert_eq!(authorize(&bob, &project, &Action::ManageMembers), Decision::Denied);
    }

    #[test]
    fn test_non_member_always_denied() {
        let creator = UserId::new("alice".to_string());
        let bob = UserId::new("bob".to_string());
        let outsider = UserId::new("mallory".to_string());
        let project = project_with_collaborator(&creator, &bob);

        for action in all_plain_actions() {
            assert_eq!(
                authorize(&outsider, &project, &action),
                Decision::Denied,
                "outsider allowed {:?}",
                action
            );
        }
    }

    #[test]
    fn test_delete_comment_author_or_creator() {
        let creator = UserId::new("alice".to_string());
        let bob = UserId::new("bob".to_string());
        let carol = UserId::new("carol".to_string());
        let mut project = project_with_collaborator(&creator, &bob);
        project.add_collaborator(carol.clone()).unwrap();

        let action = Action::DeleteComment { author: bob.clone() };

        // Author may delete their own comment
        assert!(authorize(&bob, &project, &action).is_allowed());
        // Creator may moderate any comment
        assert!(authorize(&creator, &project, &action).is_allowed());
        // Another collaborator may not
        assert_eq!(authorize(&carol, &project, &action), Decision::Denied);
    }

    #[test]
    fn test_authorize_is_deterministic() {
        let creator = UserId::new("alice".to_string());
        let bob = UserId::new("bob".to_string());
        let project = project_with_collaborator(&creator, &bob);

        for _ in 0..3 {
            assert_eq!(
                authorize(&bob, &project, &Action::ReadProject),
                Decision::Allowed
            );
            assert_eq!(
                authorize(&bob, &project, &Action::ManageMembers),
                Decision::Denied
            );
        }
    }
}
