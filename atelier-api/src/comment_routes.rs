//! Comment handlers

use crate::error::ApiResult;
use crate::state::AppState;
use atelier_core::core_model::{CommentId, CommentView, ProjectId};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub content: String,
}

/// GET /api/comments/project/:project_id - Comments for a project, newest first
pub async fn list_comments(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(project_id): Path<ProjectId>,
) -> ApiResult<Json<Vec<CommentView>>> {
    let principal = state.require_principal(&headers)?;
    let comments = state
        .facade
        .list_comments(&principal.user_id, &project_id)
        .await?;
    Ok(Json(comments))
}

/// POST /api/comments/project/:project_id - Post a comment
pub async fn add_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(project_id): Path<ProjectId>,
    Json(req): Json<CommentRequest>,
) -> ApiResult<(StatusCode, Json<CommentView>)> {
    let principal = state.require_principal(&headers)?;
    let comment = state
        .facade
        .add_comment(&principal.user_id, &project_id, req.content)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// DELETE /api/comments/:comment_id - Delete a comment (author or creator)
pub async fn delete_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(comment_id): Path<CommentId>,
) -> ApiResult<StatusCode> {
    let principal = state.require_principal(&headers)?;
    state
        .facade
        .delete_comment(&principal.user_id, &comment_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
