//! Authentication user types.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::db::UserRole;

/// Authority granted when a token carries no role claim.
pub const DEFAULT_AUTHORITY: &str = "user";

/// Authenticated identity derived from a valid token. Lives for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedPrincipal {
    /// Database user ID from the `"id"` claim, if the token carries one
    pub user_id: Option<i64>,
    /// Token subject (user email)
    pub subject: String,
    /// Role strings, e.g. `"user"` or `"admin"`
    pub authorities: BTreeSet<String>,
}

impl AuthenticatedPrincipal {
    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.contains(authority)
    }

    pub fn is_admin(&self) -> bool {
        self.has_authority(UserRole::Admin.as_str())
    }
}
