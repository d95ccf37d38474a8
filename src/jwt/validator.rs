//! Token validation: signature, issuer and expiry.

use tracing::debug;

use super::claims::TokenClaims;
use super::{JwtConfig, JwtError};

impl JwtConfig {
    /// Verify `token` and check that it has not expired.
    /// A token is still valid in the second it expires.
    pub fn validate(&self, token: &str) -> Result<TokenClaims, JwtError> {
        let claims = self.decode_claims(token)?;
        let now = self.clock.now()?;

        if now > claims.exp {
            return Err(JwtError::Expired);
        }

        Ok(claims)
    }

    /// Boolean gate in front of every token-derived decision. Never fails.
    pub fn is_valid(&self, token: &str) -> bool {
        match self.validate(token) {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "Token rejected");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::{FixedClock, TokenSubject};
    use std::collections::BTreeMap;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    const SECRET: &[u8] = b"test-secret-key-for-testing";
    const DAY: u64 = 24 * 60 * 60;

    struct TestUser(i64);

    impl TokenSubject for TestUser {
        fn token_id(&self) -> i64 {
            self.0
        }
        fn token_subject(&self) -> &str {
            "user@email.com"
        }
    }

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    fn claims(iat: u64, exp: u64) -> TokenClaims {
        TokenClaims {
            sub: "user@email.com".to_string(),
            iss: "quillpost".to_string(),
            iat,
            exp,
            custom: BTreeMap::new(),
        }
    }

    #[test]
    fn test_fresh_token_is_valid() {
        let config = JwtConfig::new(SECRET, "quillpost");

        let issued = config
            .generate(&TestUser(1), Duration::from_secs(60))
            .unwrap();

        assert!(config.is_valid(&issued.token));
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let config = JwtConfig::new(SECRET, "quillpost");
        let now = now();

        // Expired 7 days ago
        let token = config
            .encode_claims(&claims(now - 14 * DAY, now - 7 * DAY))
            .unwrap();

        assert!(!config.is_valid(&token));
        assert!(matches!(config.validate(&token), Err(JwtError::Expired)));
    }

    #[test]
    fn test_token_issued_in_the_past_expires() {
        let now = now();
        let issuer = JwtConfig::new(SECRET, "quillpost").with_clock(FixedClock(now - 2 * 60 * 60));

        let issued = issuer
            .generate(&TestUser(1), Duration::from_secs(60 * 60))
            .unwrap();

        let validator = JwtConfig::new(SECRET, "quillpost");
        assert!(!validator.is_valid(&issued.token));
    }

    #[test]
    fn test_expiry_boundary() {
        let base = JwtConfig::new(SECRET, "quillpost");
        let token = base.encode_claims(&claims(1_000, 2_000)).unwrap();

        assert!(base.clone().with_clock(FixedClock(1_999)).is_valid(&token));
        assert!(base.clone().with_clock(FixedClock(2_000)).is_valid(&token));
        assert!(!base.clone().with_clock(FixedClock(2_001)).is_valid(&token));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let config1 = JwtConfig::new(b"secret-1", "quillpost");
        let config2 = JwtConfig::new(b"secret-2", "quillpost");

        let issued = config1
            .generate(&TestUser(1), Duration::from_secs(60))
            .unwrap();

        assert!(!config2.is_valid(&issued.token));
    }

    #[test]
    fn test_tampered_payload_is_invalid() {
        let config = JwtConfig::new(SECRET, "quillpost");
        let issued = config
            .generate(&TestUser(1), Duration::from_secs(60))
            .unwrap();
        let other = config
            .generate(&TestUser(2), Duration::from_secs(60))
            .unwrap();

        // Splice the payload of one token onto the signature of another
        let parts: Vec<&str> = issued.token.split('.').collect();
        let other_parts: Vec<&str> = other.token.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        assert!(!config.is_valid(&forged));
    }

    #[test]
    fn test_malformed_input_is_invalid() {
        let config = JwtConfig::new(SECRET, "quillpost");

        assert!(!config.is_valid(""));
        assert!(!config.is_valid("invalid-token"));
        assert!(!config.is_valid("a.b.c"));
        assert!(!config.is_valid("Bearer abc"));
    }

    #[test]
    fn test_missing_exp_is_invalid() {
        let config = JwtConfig::new(SECRET, "quillpost");

        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &serde_json::json!({ "sub": "user@email.com", "iss": "quillpost", "id": 1 }),
            &jsonwebtoken::EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(!config.is_valid(&token));
    }
}
