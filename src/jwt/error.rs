//! Token codec and validation errors.

use jsonwebtoken::errors::ErrorKind;

/// Errors that can occur during JWT operations.
#[derive(Debug)]
pub enum JwtError {
    /// Input is not a well-formed signed token
    Malformed,
    /// Signature does not match the configured key or algorithm
    SignatureInvalid,
    /// Token is past its expiration time
    Expired,
    /// Token was issued by someone else
    IssuerMismatch,
    /// Requested lifetime is zero or above the configured maximum
    InvalidLifetime,
    /// Only HMAC algorithms can be used with a shared secret
    UnsupportedAlgorithm,
    /// Error encoding the token
    Encoding(jsonwebtoken::errors::Error),
    /// System time error
    TimeError,
}

impl JwtError {
    /// Classify a `jsonwebtoken` decode failure.
    pub(crate) fn from_decode(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => JwtError::SignatureInvalid,
            ErrorKind::ExpiredSignature => JwtError::Expired,
            ErrorKind::InvalidIssuer => JwtError::IssuerMismatch,
            _ => JwtError::Malformed,
        }
    }
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::Malformed => write!(f, "Malformed token"),
            JwtError::SignatureInvalid => write!(f, "Invalid token signature"),
            JwtError::Expired => write!(f, "Token has expired"),
            JwtError::IssuerMismatch => write!(f, "Unexpected token issuer"),
            JwtError::InvalidLifetime => write!(f, "Token lifetime out of range"),
            JwtError::UnsupportedAlgorithm => write!(f, "Unsupported signing algorithm"),
            JwtError::Encoding(e) => write!(f, "Failed to encode token: {}", e),
            JwtError::TimeError => write!(f, "System time error"),
        }
    }
}

impl std::error::Error for JwtError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JwtError::Encoding(e) => Some(e),
            _ => None,
        }
    }
}
