//! Password hashing and verification using Argon2id.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use std::sync::LazyLock;

/// Hash checked against when no account matches, so a login for an unknown
/// email costs the same Argon2 run as a wrong password.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("quillpost-no-such-account").ok());

/// Error types for password operations.
#[derive(Debug)]
pub enum PasswordError {
    /// Failed to hash password
    HashingFailed(String),
    /// Failed to verify password
    VerificationFailed(String),
    /// Stored hash is not a PHC string
    InvalidHashFormat(String),
}

impl std::fmt::Display for PasswordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PasswordError::HashingFailed(e) => write!(f, "Failed to hash password: {}", e),
            PasswordError::VerificationFailed(e) => write!(f, "Failed to verify password: {}", e),
            PasswordError::InvalidHashFormat(e) => write!(f, "Invalid password hash format: {}", e),
        }
    }
}

impl std::error::Error for PasswordError {}

/// Hash a password into a PHC string with a random salt.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))
}

/// Check `password` against a stored PHC string.
/// `Ok(false)` means the password is wrong.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed =
        PasswordHash::new(hash).map_err(|e| PasswordError::InvalidHashFormat(e.to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerificationFailed(e.to_string())),
    }
}

/// Run a full verification against a throwaway hash. Always false for
/// real input; only its cost matters.
pub fn verify_dummy_password(password: &str) -> bool {
    DUMMY_HASH
        .as_deref()
        .is_some_and(|hash| verify_password(password, hash).unwrap_or(false))
}
