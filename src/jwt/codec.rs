//! Token encoding and decoding.

use jsonwebtoken::Header;
use std::collections::BTreeMap;
use std::time::Duration;

use super::claims::{ID_CLAIM, REGISTERED_CLAIMS, ROLE_CLAIM, TokenClaims, TokenSubject};
use super::{JwtConfig, JwtError};

/// Result of generating a token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// The JWT token string
    pub token: String,
    /// Issued at timestamp (Unix seconds)
    pub issued_at: u64,
    /// Expiration timestamp (Unix seconds)
    pub expires_at: u64,
    /// Token duration in seconds
    pub duration: u64,
}

impl JwtConfig {
    /// Generate a token for `subject` valid for `lifetime`.
    pub fn generate(
        &self,
        subject: &impl TokenSubject,
        lifetime: Duration,
    ) -> Result<IssuedToken, JwtError> {
        self.generate_with_claims(subject, lifetime, BTreeMap::new())
    }

    /// Generate a token with extra custom claims. `"id"` and `"role"` always
    /// come from `subject`; extras named like a registered claim are dropped.
    pub fn generate_with_claims(
        &self,
        subject: &impl TokenSubject,
        lifetime: Duration,
        extra: BTreeMap<String, serde_json::Value>,
    ) -> Result<IssuedToken, JwtError> {
        let duration = lifetime.as_secs();
        if duration == 0 || lifetime > self.policy.max {
            return Err(JwtError::InvalidLifetime);
        }

        let now = self.clock.now()?;
        let exp = now
            .checked_add(duration)
            .ok_or(JwtError::InvalidLifetime)?;

        let mut custom = extra;
        custom.retain(|name, _| !REGISTERED_CLAIMS.contains(&name.as_str()));
        custom.insert(ID_CLAIM.to_string(), subject.token_id().into());
        if let Some(role) = subject.token_role() {
            custom.insert(ROLE_CLAIM.to_string(), role.into());
        }

        let claims = TokenClaims {
            sub: subject.token_subject().to_string(),
            iss: self.issuer.clone(),
            iat: now,
            exp,
            custom,
        };

        let token = self.encode_claims(&claims)?;

        Ok(IssuedToken {
            token,
            issued_at: claims.iat,
            expires_at: claims.exp,
            duration,
        })
    }

    /// Sign arbitrary claims as-is. No lifetime checks are applied.
    pub fn encode_claims(&self, claims: &TokenClaims) -> Result<String, JwtError> {
        jsonwebtoken::encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .map_err(JwtError::Encoding)
    }

    /// Verify the signature and issuer of `token` and return its claims.
    /// Expiry is not checked here; see `validate`.
    pub fn decode_claims(&self, token: &str) -> Result<TokenClaims, JwtError> {
        jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation())
            .map(|data| data.claims)
            .map_err(JwtError::from_decode)
    }
}
