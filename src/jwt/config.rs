//! Signing configuration shared by every token operation.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Validation};
use std::sync::Arc;
use std::time::Duration;

use super::JwtError;
use super::clock::{Clock, SystemClock};

/// Access token duration issued at login: 1 day
pub const ACCESS_TOKEN_DURATION: Duration = Duration::from_secs(24 * 60 * 60);

/// Refresh token duration: 2 weeks
pub const REFRESH_TOKEN_DURATION: Duration = Duration::from_secs(14 * 24 * 60 * 60);

/// Secret material plus the HMAC algorithm it is used with.
#[derive(Clone)]
pub struct SigningKey {
    secret: Vec<u8>,
    algorithm: Algorithm,
}

impl SigningKey {
    /// HS256 key from a shared secret.
    pub fn hmac(secret: &[u8]) -> Self {
        Self {
            secret: secret.to_vec(),
            algorithm: Algorithm::HS256,
        }
    }

    /// Key for an explicit algorithm. Only HS256, HS384 and HS512 are accepted.
    pub fn new(secret: &[u8], algorithm: Algorithm) -> Result<Self, JwtError> {
        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(Self {
                secret: secret.to_vec(),
                algorithm,
            }),
            _ => Err(JwtError::UnsupportedAlgorithm),
        }
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("secret", &"[redacted]")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

/// Token lifetimes used by login and the upper bound accepted by `generate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifetimePolicy {
    pub access: Duration,
    pub refresh: Duration,
    pub max: Duration,
}

impl Default for LifetimePolicy {
    fn default() -> Self {
        Self {
            access: ACCESS_TOKEN_DURATION,
            refresh: REFRESH_TOKEN_DURATION,
            max: REFRESH_TOKEN_DURATION,
        }
    }
}

/// Configuration for JWT operations.
#[derive(Clone)]
pub struct JwtConfig {
    pub(super) encoding_key: EncodingKey,
    pub(super) decoding_key: DecodingKey,
    pub(super) algorithm: Algorithm,
    pub(super) issuer: String,
    pub(super) policy: LifetimePolicy,
    pub(super) clock: Arc<dyn Clock>,
}

impl JwtConfig {
    /// Create a new HS256 configuration with the given secret and issuer.
    pub fn new(secret: &[u8], issuer: impl Into<String>) -> Self {
        Self::from_key(&SigningKey::hmac(secret), issuer)
    }

    /// Create a configuration from an explicit signing key.
    pub fn from_key(key: &SigningKey, issuer: impl Into<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(&key.secret),
            decoding_key: DecodingKey::from_secret(&key.secret),
            algorithm: key.algorithm,
            issuer: issuer.into(),
            policy: LifetimePolicy::default(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_policy(mut self, policy: LifetimePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the time source (tests pin it with `FixedClock`).
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn policy(&self) -> &LifetimePolicy {
        &self.policy
    }

    /// Signature, algorithm and issuer checks. Expiry is checked against our
    /// own clock in `validate`, so the library's wall-clock check is off.
    pub(super) fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.validate_exp = false;
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("algorithm", &self.algorithm)
            .field("issuer", &self.issuer)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signing_key_debug_is_redacted() {
        let key = SigningKey::hmac(b"super-secret-value");
        let debug = format!("{:?}", key);
        assert!(!debug.contains("super-secret-value"));
        assert!(debug.contains("[redacted]"));
    }

    #[test]
    fn test_jwt_config_debug_omits_keys() {
        let config = JwtConfig::new(b"super-secret-value", "quillpost");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-value"));
        assert!(debug.contains("quillpost"));
    }

    #[test]
    fn test_non_hmac_algorithm_rejected() {
        assert!(matches!(
            SigningKey::new(b"secret", Algorithm::RS256),
            Err(JwtError::UnsupportedAlgorithm)
        ));
        assert!(SigningKey::new(b"secret", Algorithm::HS512).is_ok());
    }

    #[test]
    fn test_default_policy() {
        let policy = LifetimePolicy::default();
        assert_eq!(policy.access, ACCESS_TOKEN_DURATION);
        assert_eq!(policy.refresh, REFRESH_TOKEN_DURATION);
        assert!(policy.refresh <= policy.max);
    }
}
