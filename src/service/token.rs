//! Access-token refresh and login.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::password::{verify_dummy_password, verify_password};
use super::stores::{RefreshTokenRepository, UserRepository};
use crate::auth::AuthError;
use crate::db::{RefreshTokenStore, UserStore};
use crate::jwt::{IssuedToken, JTI_CLAIM, JwtConfig};

/// Lifetime of access tokens issued from a refresh token: 2 hours
pub const REFRESHED_ACCESS_TOKEN_DURATION: Duration = Duration::from_secs(2 * 60 * 60);

/// Tokens handed out at login.
#[derive(Debug, Clone)]
pub struct LoginTokens {
    pub access: IssuedToken,
    pub refresh: IssuedToken,
}

/// Token service wired to the sqlx stores.
pub type SqlTokenService = TokenService<UserStore, RefreshTokenStore>;

/// Issues access tokens from credentials or from stored refresh tokens.
pub struct TokenService<U, R> {
    jwt: Arc<JwtConfig>,
    users: U,
    refresh_tokens: R,
}

impl<U, R> TokenService<U, R>
where
    U: UserRepository,
    R: RefreshTokenRepository,
{
    pub fn new(jwt: Arc<JwtConfig>, users: U, refresh_tokens: R) -> Self {
        Self {
            jwt,
            users,
            refresh_tokens,
        }
    }

    pub fn jwt(&self) -> &JwtConfig {
        &self.jwt
    }

    /// Exchange a refresh token for a new 2-hour access token.
    ///
    /// The stored record, not the token's own claims, decides which user the
    /// new token is bound to. The refresh token itself is left untouched.
    pub async fn create_new_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<IssuedToken, AuthError> {
        let claims = match self.jwt.validate(refresh_token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e, "Refresh token rejected");
                return Err(AuthError::InvalidToken);
            }
        };

        let record = self
            .refresh_tokens
            .find_by_token(refresh_token)
            .await?
            .ok_or(AuthError::TokenNotFound)?;

        if let Some(claimed) = claims.user_id().filter(|&id| id != record.user_id) {
            warn!(
                record_id = record.id,
                claimed_user_id = claimed,
                stored_user_id = record.user_id,
                "Refresh token claims disagree with stored binding"
            );
        }

        let user = self
            .users
            .find_by_id(record.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let access = self
            .jwt
            .generate(&user, REFRESHED_ACCESS_TOKEN_DURATION)?;

        info!(user_id = user.id, "Issued access token from refresh token");
        Ok(access)
    }

    /// Verify credentials, then issue an access token and a stored refresh token.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginTokens, AuthError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            verify_dummy_password(password);
            return Err(AuthError::BadCredentials);
        };

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::BadCredentials);
        }

        let policy = *self.jwt.policy();
        let access = self.jwt.generate(&user, policy.access)?;

        // Two logins in the same second must still yield distinct refresh tokens.
        let mut extra = BTreeMap::new();
        extra.insert(
            JTI_CLAIM.to_string(),
            uuid::Uuid::new_v4().to_string().into(),
        );
        let refresh = self.jwt.generate_with_claims(&user, policy.refresh, extra)?;

        self.refresh_tokens
            .save(user.id, &refresh.token, refresh.expires_at)
            .await?;

        info!(user_id = user.id, "User logged in");
        Ok(LoginTokens { access, refresh })
    }
}
