//! Project CRUD, collaborator, and media handlers
//!
//! Every handler resolves the bearer principal first, then defers to the
//! store façade, which owns all authorization decisions.

use crate::error::ApiResult;
use crate::state::AppState;
use atelier_core::core_model::{
    MediaId, MediaItem, MediaKind, Project, ProjectId, PublicUser, UserId,
};
use atelier_core::core_store::{NewProject, ProjectPatch};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct MediaRequest {
    pub kind: MediaKind,
    pub url: String,
    #[serde(default)]
    pub caption: String,
}

#[derive(Debug, Deserialize)]
pub struct CollaboratorRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct CollaboratorResponse {
    pub project: Project,
    pub collaborator: PublicUser,
}

/// GET /api/projects - Projects the principal is a member of, newest first
pub async fn list_projects(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<Project>>> {
    let principal = state.require_principal(&headers)?;
    let projects = state.facade.list_projects_for(&principal.user_id).await;
    Ok(Json(projects))
}

/// POST /api/projects - Create a project owned by the principal
pub async fn create_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<NewProject>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    let principal = state.require_principal(&headers)?;
    let project = state.facade.create_project(&principal.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects/:id - Fetch one project
pub async fn get_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(project_id): Path<ProjectId>,
) -> ApiResult<Json<Project>> {
    let principal = state.require_principal(&headers)?;
    let project = state
        .facade
        .get_project(&principal.user_id, &project_id)
        .await?;
    Ok(Json(project))
}

/// PUT /api/projects/:id - Partial update; absent fields are untouched
pub async fn update_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(project_id): Path<ProjectId>,
    Json(patch): Json<ProjectPatch>,
) -> ApiResult<Json<Project>> {
    let principal = state.require_principal(&headers)?;
    let project = state
        .facade
        .update_project(&principal.user_id, &project_id, patch)
        .await?;
    Ok(Json(project))
}

/// DELETE /api/projects/:id - Delete the project and its comments
pub async fn delete_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(project_id): Path<ProjectId>,
) -> ApiResult<StatusCode> {
    let principal = state.require_principal(&headers)?;
    state
        .facade
        .delete_project(&principal.user_id, &project_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/projects/:id/collaborators - Add a collaborator by email
pub async fn add_collaborator(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(project_id): Path<ProjectId>,
    Json(req): Json<CollaboratorRequest>,
) -> ApiResult<Json<CollaboratorResponse>> {
    let principal = state.require_principal(&headers)?;
    let (project, collaborator) = state
        .facade
        .add_collaborator_by_email(&principal.user_id, &project_id, &req.email)
        .await?;
    Ok(Json(CollaboratorResponse {
        project,
        collaborator,
    }))
}

/// DELETE /api/projects/:id/collaborators/:user_id - Remove a collaborator
pub async fn remove_collaborator(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((project_id, user_id)): Path<(ProjectId, UserId)>,
) -> ApiResult<Json<Project>> {
    let principal = state.require_principal(&headers)?;
    let project = state
        .facade
        .remove_collaborator(&principal.user_id, &project_id, &user_id)
        .await?;
    Ok(Json(project))
}

/// POST /api/projects/:id/media - Attach a media item
pub async fn add_media(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(project_id): Path<ProjectId>,
    Json(req): Json<MediaRequest>,
) -> ApiResult<(StatusCode, Json<MediaItem>)> {
    let principal = state.require_principal(&headers)?;
    let item = state
        .facade
        .add_media(
            &principal.user_id,
            &project_id,
            req.kind,
            req.url,
            req.caption,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// DELETE /api/projects/:id/media/:media_id - Detach a media item
pub async fn remove_media(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((project_id, media_id)): Path<(ProjectId, MediaId)>,
) -> ApiResult<StatusCode> {
    let principal = state.require_principal(&headers)?;
    state
        .facade
        .remove_media(&principal.user_id, &project_id, &media_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
