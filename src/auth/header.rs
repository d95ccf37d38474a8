//! `Authorization` header parsing.

use axum::http::{HeaderMap, header};

/// Scheme prefix for bearer credentials.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let prefix = value.get(..BEARER_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(BEARER_PREFIX) {
        return None;
    }
    let token = value[BEARER_PREFIX.len()..].trim();
    if token.is_empty() { None } else { Some(token) }
}
