use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Claim carrying the user's database id.
pub const ID_CLAIM: &str = "id";

/// Claim carrying the user's role.
pub const ROLE_CLAIM: &str = "role";

/// Claim carrying a unique token id (refresh tokens only).
pub const JTI_CLAIM: &str = "jti";

/// Claims carried as struct fields; a custom entry with one of these names
/// would serialize as a duplicate key.
pub const REGISTERED_CLAIMS: [&str; 4] = ["sub", "iss", "iat", "exp"];

/// Claims embedded in every token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user email)
    pub sub: String,
    /// Issuer
    pub iss: String,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Everything else in the payload, e.g. `"id"` and `"role"`
    #[serde(flatten)]
    pub custom: BTreeMap<String, serde_json::Value>,
}

impl TokenClaims {
    /// The `"id"` claim, if present and an integer.
    pub fn user_id(&self) -> Option<i64> {
        self.custom.get(ID_CLAIM).and_then(serde_json::Value::as_i64)
    }

    /// The `"role"` claim, if present and a string.
    pub fn role(&self) -> Option<&str> {
        self.custom.get(ROLE_CLAIM).and_then(serde_json::Value::as_str)
    }
}

/// An entity a token can be issued for.
pub trait TokenSubject {
    /// Identifier stored under the `"id"` claim.
    fn token_id(&self) -> i64;

    /// Value of the `sub` claim.
    fn token_subject(&self) -> &str;

    /// Role stored under the `"role"` claim. Omitted when `None`.
    fn token_role(&self) -> Option<&str> {
        None
    }
}
