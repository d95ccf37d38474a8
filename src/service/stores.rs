//! Store seams used by the token service.
//!
//! The sqlx stores implement these directly; tests substitute in-memory
//! doubles to observe which lookups happen.

use std::future::Future;

use crate::db::{RefreshTokenRecord, RefreshTokenStore, User, UserStore};

/// User lookups needed by login and refresh.
pub trait UserRepository: Send + Sync {
    fn find_by_id(&self, id: i64) -> impl Future<Output = Result<Option<User>, sqlx::Error>> + Send;

    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, sqlx::Error>> + Send;
}

/// Refresh token persistence needed by login and refresh.
pub trait RefreshTokenRepository: Send + Sync {
    /// Exact-match lookup by token value.
    fn find_by_token(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Option<RefreshTokenRecord>, sqlx::Error>> + Send;

    fn save(
        &self,
        user_id: i64,
        token: &str,
        expires_at: u64,
    ) -> impl Future<Output = Result<i64, sqlx::Error>> + Send;
}

impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
        self.get_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        self.get_by_email(email).await
    }
}

impl RefreshTokenRepository for RefreshTokenStore {
    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshTokenRecord>, sqlx::Error> {
        self.get_by_token(token).await
    }

    async fn save(&self, user_id: i64, token: &str, expires_at: u64) -> Result<i64, sqlx::Error> {
        self.create(user_id, token, expires_at).await
    }
}
