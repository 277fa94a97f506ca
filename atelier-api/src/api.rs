//! API routes definition

use crate::state::AppState;
use crate::{auth_routes, comment_routes, project_routes, ws};
use axum::{
    routing::{delete, get, post, put},
    Router,
};

/// Build the API router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Auth routes
        .route("/api/auth/register", post(auth_routes::register))
        .route("/api/auth/login", post(auth_routes::login))
        .route("/api/auth/me", get(auth_routes::me))
        // Project routes
        .route("/api/projects", get(project_routes::list_projects))
        .route("/api/projects", post(project_routes::create_project))
        .route("/api/projects/:id", get(project_routes::get_project))
        .route("/api/projects/:id", put(project_routes::update_project))
        .route("/api/projects/:id", delete(project_routes::delete_project))
        .route(
            "/api/projects/:id/collaborators",
            post(project_routes::add_collaborator),
        )
        .route(
            "/api/projects/:id/collaborators/:user_id",
            delete(project_routes::remove_collaborator),
        )
        .route("/api/projects/:id/media", post(project_routes::add_media))
        .route(
            "/api/projects/:id/media/:media_id",
            delete(project_routes::remove_media),
        )
        // Comment routes
        .route(
            "/api/comments/project/:project_id",
            get(comment_routes::list_comments),
        )
        .route(
            "/api/comments/project/:project_id",
            post(comment_routes::add_comment),
        )
        .route(
            "/api/comments/:comment_id",
            delete(comment_routes::delete_comment),
        )
        // Live notification socket
        .route("/ws", get(ws::ws_handler))
        // State
        .with_state(state)
}
