//! Refresh token storage.
//!
//! A refresh token is only honoured while a record with its exact value
//! exists here. Access tokens are stateless and never stored.

use sqlx::sqlite::SqlitePool;

/// A stored refresh token bound to a user.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct RefreshTokenRecord {
    pub id: i64,
    pub user_id: i64,
    pub token: String,
    /// Unix timestamp
    pub expires_at: i64,
    pub created_at: String,
}

/// Store for refresh token records.
#[derive(Clone)]
pub struct RefreshTokenStore {
    pool: SqlitePool,
}

impl RefreshTokenStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a refresh token issued to `user_id`. Returns the record ID.
    pub async fn create(
        &self,
        user_id: i64,
        token: &str,
        expires_at: u64,
    ) -> Result<i64, sqlx::Error> {
        let expires_at = i64::try_from(expires_at).unwrap_or(i64::MAX);

        let result =
            sqlx::query("INSERT INTO refresh_tokens (user_id, token, expires_at) VALUES (?, ?, ?)")
                .bind(user_id)
                .bind(token)
                .bind(expires_at)
                .execute(&self.pool)
                .await?;

        Ok(result.last_insert_rowid())
    }

    /// Look up a record by exact token value.
    pub async fn get_by_token(
        &self,
        token: &str,
    ) -> Result<Option<RefreshTokenRecord>, sqlx::Error> {
        sqlx::query_as(
            "SELECT id, user_id, token, expires_at, created_at FROM refresh_tokens WHERE token = ?",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
    }

    /// Delete all records whose expiry has passed.
    pub async fn delete_expired(&self) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM refresh_tokens WHERE expires_at < CAST(strftime('%s', 'now') AS INTEGER)",
        )
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use crate::db::Database;

    const FAR_FUTURE: u64 = 4_102_444_800;

    #[tokio::test]
    async fn test_create_and_get_by_token() {
        let db = Database::open(":memory:").await.unwrap();
        let user_id = db.users().create("alice@example.com", "hash").await.unwrap();

        let id = db
            .refresh_tokens()
            .create(user_id, "token-a", FAR_FUTURE)
            .await
            .unwrap();

        let record = db
            .refresh_tokens()
            .get_by_token("token-a")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.user_id, user_id);
        assert_eq!(record.token, "token-a");
        assert_eq!(record.expires_at, FAR_FUTURE as i64);
    }

    #[tokio::test]
    async fn test_lookup_is_exact_match() {
        let db = Database::open(":memory:").await.unwrap();
        let user_id = db.users().create("alice@example.com", "hash").await.unwrap();
        db.refresh_tokens()
            .create(user_id, "token-a", FAR_FUTURE)
            .await
            .unwrap();

        let store = db.refresh_tokens();
        assert!(store.get_by_token("token-").await.unwrap().is_none());
        assert!(store.get_by_token("TOKEN-A").await.unwrap().is_none());
        assert!(store.get_by_token("token-a ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_token_fails() {
        let db = Database::open(":memory:").await.unwrap();
        let user_id = db.users().create("alice@example.com", "hash").await.unwrap();

        let store = db.refresh_tokens();
        store.create(user_id, "token-a", FAR_FUTURE).await.unwrap();
        assert!(store.create(user_id, "token-a", FAR_FUTURE).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_expired() {
        let db = Database::open(":memory:").await.unwrap();
        let user_id = db.users().create("alice@example.com", "hash").await.unwrap();

        let store = db.refresh_tokens();
        store.create(user_id, "expired", 1_000).await.unwrap();
        store.create(user_id, "live", FAR_FUTURE).await.unwrap();

        assert_eq!(store.delete_expired().await.unwrap(), 1);
        assert!(store.get_by_token("expired").await.unwrap().is_none());
        assert!(store.get_by_token("live").await.unwrap().is_some());
    }
}
