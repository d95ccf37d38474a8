//! Token → principal resolution.

use std::collections::BTreeSet;
use tracing::debug;

use super::errors::AuthError;
use super::types::{AuthenticatedPrincipal, DEFAULT_AUTHORITY};
use crate::jwt::{JwtConfig, TokenClaims};

/// Validate `token` and return its claims, collapsing every failure into
/// `AuthError::InvalidToken`.
fn valid_claims(jwt: &JwtConfig, token: &str) -> Result<TokenClaims, AuthError> {
    jwt.validate(token).map_err(|e| {
        debug!(error = %e, "Rejected token");
        AuthError::InvalidToken
    })
}

/// Build the principal for a valid token.
pub fn resolve(jwt: &JwtConfig, token: &str) -> Result<AuthenticatedPrincipal, AuthError> {
    let claims = valid_claims(jwt, token)?;

    let authority = claims.role().unwrap_or(DEFAULT_AUTHORITY).to_string();

    Ok(AuthenticatedPrincipal {
        user_id: claims.user_id(),
        subject: claims.sub,
        authorities: BTreeSet::from([authority]),
    })
}

/// Extract only the `"id"` claim of a valid token.
pub fn get_user_id(jwt: &JwtConfig, token: &str) -> Result<i64, AuthError> {
    valid_claims(jwt, token)?
        .user_id()
        .ok_or(AuthError::InvalidToken)
}
