//! Axum extractors for authentication.

use axum::{extract::FromRequestParts, http::request::Parts};

use super::errors::ApiAuthError;
use super::header::bearer_token;
use super::resolver::resolve;
use super::state::HasAuthBackend;
use super::types::AuthenticatedPrincipal;

/// Extractor for endpoints that require a valid bearer access token.
/// Returns JSON errors.
pub struct Auth(pub AuthenticatedPrincipal);

impl<S> FromRequestParts<S> for Auth
where
    S: HasAuthBackend + Send + Sync,
{
    type Rejection = ApiAuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(ApiAuthError::NotAuthenticated)?;
        let principal = resolve(state.jwt(), token)?;
        Ok(Auth(principal))
    }
}

/// Optional authentication extractor - never fails.
/// Missing or invalid tokens both yield `None`.
pub struct OptionalAuth(pub Option<AuthenticatedPrincipal>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: HasAuthBackend + Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let principal = bearer_token(&parts.headers).and_then(|t| resolve(state.jwt(), t).ok());
        Ok(OptionalAuth(principal))
    }
}
