//! JWT token generation and validation.
//!
//! Access tokens are stateless and never stored. Refresh tokens use the same
//! codec but are additionally recorded in the database at login; see
//! `service::TokenService` for how the two meet.

mod claims;
mod clock;
mod codec;
mod config;
mod error;
mod validator;

pub use claims::{ID_CLAIM, JTI_CLAIM, ROLE_CLAIM, TokenClaims, TokenSubject};
pub use clock::{Clock, FixedClock, SystemClock};
pub use codec::IssuedToken;
pub use config::{
    ACCESS_TOKEN_DURATION, JwtConfig, LifetimePolicy, REFRESH_TOKEN_DURATION, SigningKey,
};
pub use error::JwtError;
pub use jsonwebtoken::Algorithm;
