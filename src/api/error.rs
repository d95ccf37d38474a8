//! Shared error handling for API endpoints.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::auth::AuthError;

/// Extension trait for concise error mapping on Results.
pub trait ResultExt<T> {
    fn db_err(self, msg: &str) -> Result<T, ApiError>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn db_err(self, msg: &str) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::db_error(msg, e))
    }
}

/// API error type with automatic response conversion.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Forbidden(String),
    NotFound(String),
    Unauthorized(String),
    Conflict(String),
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn db_error(context: &str, e: impl std::fmt::Display) -> Self {
        error!("{}: {}", context, e);
        Self::Internal("Database error".into())
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        let message = e.message().to_string();
        match e.status_code() {
            StatusCode::UNAUTHORIZED => Self::Unauthorized(message),
            _ => {
                error!(error = %e, "Token operation failed");
                Self::Internal(message)
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_mapping() {
        assert!(matches!(
            ApiError::from(AuthError::InvalidToken),
            ApiError::Unauthorized(msg) if msg == "Unexpected token"
        ));
        assert!(matches!(
            ApiError::from(AuthError::TokenNotFound),
            ApiError::Unauthorized(msg) if msg == "Unexpected token"
        ));
        assert!(matches!(
            ApiError::from(AuthError::UserNotFound),
            ApiError::Internal(_)
        ));
    }
}
