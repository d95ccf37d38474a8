mod article;
mod refresh_token;
mod user;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

pub use article::{Article, ArticleStore};
pub use refresh_token::{RefreshTokenRecord, RefreshTokenStore};
pub use user::{User, UserRole, UserStore};

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open or create a database at the given path.
    /// Use ":memory:" for an in-memory database.
    pub async fn open(path: &str) -> Result<Self, sqlx::Error> {
        let url = if path == ":memory:" {
            "sqlite::memory:".to_string()
        } else {
            format!("sqlite:{}?mode=rwc", path)
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Get the current schema version.
    async fn get_version(&self) -> Result<i32, sqlx::Error> {
        let result: Option<(i32,)> = sqlx::query_as("SELECT version FROM schema_version LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;
        Ok(result.map(|r| r.0).unwrap_or(0))
    }

    /// Set the schema version within a transaction.
    async fn set_version(
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        version: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM schema_version")
            .execute(&mut **tx)
            .await?;
        sqlx::query("INSERT INTO schema_version (version) VALUES (?)")
            .bind(version)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Run database migrations.
    async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::query("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL)")
            .execute(&self.pool)
            .await?;

        let version = self.get_version().await?;

        if version < 1 {
            self.migrate_v1().await?;
        }

        Ok(())
    }

    /// Execute a list of queries in a transaction, then set the version.
    async fn run_migration(
        &self,
        version: i32,
        queries: &[&'static str],
    ) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        for query in queries {
            sqlx::query(*query).execute(&mut *tx).await?;
        }
        Self::set_version(&mut tx, version).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn migrate_v1(&self) -> Result<(), sqlx::Error> {
        self.run_migration(
            1,
            &[
                // Users table
                "CREATE TABLE users (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    email TEXT UNIQUE NOT NULL COLLATE NOCASE,
                    password_hash TEXT NOT NULL,
                    role TEXT NOT NULL DEFAULT 'user',
                    created_at TEXT NOT NULL DEFAULT (datetime('now'))
                )",
                "CREATE INDEX idx_users_email ON users(email)",
                // Refresh tokens; expires_at is a Unix timestamp
                "CREATE TABLE refresh_tokens (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                    token TEXT UNIQUE NOT NULL,
                    expires_at INTEGER NOT NULL,
                    created_at TEXT NOT NULL DEFAULT (datetime('now'))
                )",
                "CREATE INDEX idx_refresh_tokens_user_id ON refresh_tokens(user_id)",
                "CREATE INDEX idx_refresh_tokens_expires_at ON refresh_tokens(expires_at)",
                // Articles; author is the subject (email) of the creating principal
                "CREATE TABLE articles (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    title TEXT NOT NULL,
                    content TEXT NOT NULL DEFAULT '',
                    author TEXT NOT NULL,
                    created_at TEXT NOT NULL DEFAULT (datetime('now')),
                    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
                )",
                "CREATE INDEX idx_articles_author ON articles(author)",
            ],
        )
        .await
    }

    /// Get the user store.
    pub fn users(&self) -> UserStore {
        UserStore::new(self.pool.clone())
    }

    /// Get the refresh token store.
    pub fn refresh_tokens(&self) -> RefreshTokenStore {
        RefreshTokenStore::new(self.pool.clone())
    }

    /// Get the article store.
    pub fn articles(&self) -> ArticleStore {
        ArticleStore::new(self.pool.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get_user() {
        let db = Database::open(":memory:").await.unwrap();

        let id = db.users().create("alice@example.com", "hash").await.unwrap();

        let user = db
            .users()
            .get_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.password_hash, "hash");
        assert_eq!(user.role, UserRole::User);

        let user = db.users().get_by_id(id).await.unwrap().unwrap();
        assert_eq!(user.id, id);
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_insensitive() {
        let db = Database::open(":memory:").await.unwrap();

        let id = db.users().create("Alice@Example.com", "hash").await.unwrap();

        let user = db
            .users()
            .get_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.id, id);
    }

    #[tokio::test]
    async fn test_duplicate_email_fails() {
        let db = Database::open(":memory:").await.unwrap();

        db.users().create("alice@example.com", "hash").await.unwrap();
        let result = db.users().create("ALICE@example.com", "hash").await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_set_role() {
        let db = Database::open(":memory:").await.unwrap();

        let id = db.users().create("alice@example.com", "hash").await.unwrap();
        assert!(db.users().set_role(id, UserRole::Admin).await.unwrap());

        let user = db.users().get_by_id(id).await.unwrap().unwrap();
        assert_eq!(user.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn test_delete_user_cascades_refresh_tokens() {
        let db = Database::open(":memory:").await.unwrap();

        let id = db.users().create("alice@example.com", "hash").await.unwrap();
        db.refresh_tokens()
            .create(id, "refresh-token", 4_102_444_800)
            .await
            .unwrap();

        db.users().delete(id).await.unwrap();

        assert!(db.users().get_by_id(id).await.unwrap().is_none());
        assert!(
            db.refresh_tokens()
                .get_by_token("refresh-token")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_migration_is_idempotent() {
        let db = Database::open(":memory:").await.unwrap();
        db.migrate().await.unwrap();
        assert_eq!(db.get_version().await.unwrap(), 1);
    }
}
