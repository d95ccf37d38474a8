//! Token API endpoints.
//!
//! - POST `/login` - Exchange email and password for an access and refresh token
//! - POST `/token` - Exchange a refresh token for a new access token
//! - GET `/token/verify` - Describe the principal behind the bearer token

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::error::ApiError;
use crate::auth::Auth;
use crate::impl_has_auth_backend;
use crate::jwt::JwtConfig;
use crate::service::SqlTokenService;

#[derive(Clone)]
pub struct TokensState {
    pub jwt: Arc<JwtConfig>,
    pub service: Arc<SqlTokenService>,
}

impl_has_auth_backend!(TokensState);

pub fn router(state: TokensState) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/token", post(create_access_token))
        .route("/token/verify", get(verify_token))
        .with_state(state)
}

#[derive(Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    access_token: String,
    access_token_expires_in: u64,
    refresh_token: String,
    refresh_token_expires_in: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateAccessTokenRequest {
    refresh_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateAccessTokenResponse {
    access_token: String,
    expires_in: u64,
}

async fn login(
    State(state): State<TokensState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let tokens = state
        .service
        .login(payload.email.trim(), &payload.password)
        .await?;

    Ok(Json(LoginResponse {
        access_token: tokens.access.token,
        access_token_expires_in: tokens.access.duration,
        refresh_token: tokens.refresh.token,
        refresh_token_expires_in: tokens.refresh.duration,
    }))
}

/// Issue a new access token for a stored refresh token.
async fn create_access_token(
    State(state): State<TokensState>,
    Json(payload): Json<CreateAccessTokenRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let access = state
        .service
        .create_new_access_token(&payload.refresh_token)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateAccessTokenResponse {
            access_token: access.token,
            expires_in: access.duration,
        }),
    ))
}

/// Returns 200 with the principal if the bearer token is valid, 401 if not.
async fn verify_token(Auth(principal): Auth) -> impl IntoResponse {
    Json(principal)
}
