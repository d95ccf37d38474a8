//! Authentication error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::jwt::JwtError;
use crate::service::PasswordError;

/// Message shown to clients for any token they cannot use.
pub const UNEXPECTED_TOKEN: &str = "Unexpected token";

/// Errors from token resolution, refresh and login.
#[derive(Debug)]
pub enum AuthError {
    /// Token is malformed, forged, from another issuer or expired
    InvalidToken,
    /// Refresh token verifies but has no stored record
    TokenNotFound,
    /// Stored record points at a user that does not exist
    UserNotFound,
    /// Unknown email or wrong password
    BadCredentials,
    /// Store lookup failed
    Store(sqlx::Error),
    /// Token could not be issued
    Issue(JwtError),
    /// Stored password hash could not be checked
    Password(PasswordError),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidToken | AuthError::TokenNotFound | AuthError::BadCredentials => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::UserNotFound
            | AuthError::Store(_)
            | AuthError::Issue(_)
            | AuthError::Password(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Internal details stay in the logs.
    pub fn message(&self) -> &'static str {
        match self {
            AuthError::InvalidToken | AuthError::TokenNotFound => UNEXPECTED_TOKEN,
            AuthError::BadCredentials => "Invalid email or password",
            AuthError::UserNotFound => "User not found",
            AuthError::Store(_) => "Database error",
            AuthError::Issue(_) => "Failed to generate token",
            AuthError::Password(_) => "Failed to verify password",
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::Store(e) => write!(f, "Store error: {}", e),
            AuthError::Issue(e) => write!(f, "{}", e),
            AuthError::Password(e) => write!(f, "{}", e),
            other => write!(f, "{}", other.message()),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuthError::Store(e) => Some(e),
            AuthError::Issue(e) => Some(e),
            AuthError::Password(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(e: sqlx::Error) -> Self {
        AuthError::Store(e)
    }
}

impl From<JwtError> for AuthError {
    fn from(e: JwtError) -> Self {
        AuthError::Issue(e)
    }
}

impl From<PasswordError> for AuthError {
    fn from(e: PasswordError) -> Self {
        AuthError::Password(e)
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

/// Rejection of the `Auth` extractor (returns JSON).
#[derive(Debug)]
pub enum ApiAuthError {
    /// No bearer token on the request
    NotAuthenticated,
    Auth(AuthError),
}

impl From<AuthError> for ApiAuthError {
    fn from(e: AuthError) -> Self {
        ApiAuthError::Auth(e)
    }
}

impl IntoResponse for ApiAuthError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiAuthError::NotAuthenticated => (StatusCode::UNAUTHORIZED, "Not authenticated"),
            ApiAuthError::Auth(e) => {
                if e.status_code().is_server_error() {
                    error!(error = %e, "Authentication failed");
                }
                (e.status_code(), e.message())
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
