//! Account registration and login handlers

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use atelier_core::core_model::PublicUser;
use axum::{
    extract::State,
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token plus the public projection of the account it names
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

/// POST /api/auth/register - Create an account and mint a token
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?
        .to_string();

    let user = state
        .facade
        .register_user(req.username, req.email, password_hash)
        .await?;

    info!(user_id = %user.id, username = %user.username, "Registered user");

    let token = state.signer.mint(&user.id)?;
    Ok(Json(AuthResponse {
        token,
        user: PublicUser::from(&user),
    }))
}

/// POST /api/auth/login - Verify credentials and mint a token
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    // A missing account and a wrong password answer identically
    let user = state
        .facade
        .find_user_by_email(&req.email)
        .await
        .map_err(|_| ApiError::BadCredentials)?;

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| ApiError::BadCredentials)?;

    let token = state.signer.mint(&user.id)?;
    Ok(Json(AuthResponse {
        token,
        user: PublicUser::from(&user),
    }))
}

/// GET /api/auth/me - Public profile of the authenticated account
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<PublicUser>> {
    let principal = state.require_principal(&headers)?;
    let user = state.facade.get_user(&principal.user_id).await?;
    Ok(Json(PublicUser::from(&user)))
}
