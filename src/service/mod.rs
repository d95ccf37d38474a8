//! Token lifecycle orchestration on top of the stores.

mod password;
mod stores;
mod token;

pub use password::{PasswordError, hash_password, verify_dummy_password, verify_password};
pub use stores::{RefreshTokenRepository, UserRepository};
pub use token::{LoginTokens, REFRESHED_ACCESS_TOKEN_DURATION, SqlTokenService, TokenService};
