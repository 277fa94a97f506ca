//! API error type and HTTP response mapping

use atelier_core::core_auth::AuthError;
use atelier_core::core_store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("Invalid email or password")]
    BadCredentials,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Auth(_) | ApiError::BadCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Store(e) => match e {
                StoreError::Forbidden => StatusCode::FORBIDDEN,
                StoreError::ProjectNotFound
                | StoreError::CommentNotFound
                | StoreError::UserNotFound
                | StoreError::CollaboratorNotFound
                | StoreError::MediaNotFound => StatusCode::NOT_FOUND,
                StoreError::AlreadyMember | StoreError::AlreadyRegistered => StatusCode::CONFLICT,
                StoreError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            },
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
