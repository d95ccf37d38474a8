//! User signup.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::db::Database;
use crate::service::hash_password;

const MAX_EMAIL_LENGTH: usize = 254;
const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Clone)]
pub struct UsersState {
    pub db: Database,
}

pub fn router(state: UsersState) -> Router {
    Router::new()
        .route("/", post(create_user))
        .with_state(state)
}

#[derive(Deserialize)]
struct CreateUserRequest {
    email: String,
    password: String,
}

#[derive(Serialize)]
struct CreateUserResponse {
    id: i64,
    email: String,
}

fn validate_email(email: &str) -> Result<(), ApiError> {
    if email.is_empty() {
        return Err(ApiError::bad_request("Email cannot be empty"));
    }
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ApiError::bad_request("Email is too long"));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
        _ => return Err(ApiError::bad_request("Invalid email address")),
    }
    if email.chars().any(char::is_whitespace) {
        return Err(ApiError::bad_request("Invalid email address"));
    }
    Ok(())
}

async fn create_user(
    State(state): State<UsersState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = payload.email.trim();
    validate_email(email)?;

    if payload.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::bad_request(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    let password_hash = hash_password(&payload.password).map_err(|e| {
        tracing::error!(error = %e, "Failed to hash password");
        ApiError::internal("Failed to create user")
    })?;

    let id = match state.db.users().create(email, &password_hash).await {
        Ok(id) => id,
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Err(ApiError::conflict("Email already registered"));
        }
        Err(e) => return Err(ApiError::db_error("Failed to create user", e)),
    };

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            id,
            email: email.to_string(),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("us er@example.com").is_err());
        assert!(validate_email(&format!("{}@example.com", "a".repeat(250))).is_err());
    }
}
