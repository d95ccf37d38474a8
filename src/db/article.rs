//! Article storage.

use sqlx::sqlite::SqlitePool;

#[derive(Clone)]
pub struct ArticleStore {
    pool: SqlitePool,
}

/// A blog article.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Subject of the principal that created the article
    pub author: String,
    pub created_at: String,
    pub updated_at: String,
}

impl ArticleStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new article. Returns the article ID.
    pub async fn create(&self, title: &str, content: &str, author: &str) -> Result<i64, sqlx::Error> {
        let result = sqlx::query("INSERT INTO articles (title, content, author) VALUES (?, ?, ?)")
            .bind(title)
            .bind(content)
            .bind(author)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Get an article by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Article>, sqlx::Error> {
        sqlx::query_as(
            "SELECT id, title, content, author, created_at, updated_at FROM articles WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// List all articles, newest first.
    pub async fn list(&self) -> Result<Vec<Article>, sqlx::Error> {
        sqlx::query_as(
            "SELECT id, title, content, author, created_at, updated_at FROM articles ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Replace title and content. Returns true if the article existed.
    pub async fn update(&self, id: i64, title: &str, content: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE articles SET title = ?, content = ?, updated_at = datetime('now') WHERE id = ?",
        )
        .bind(title)
        .bind(content)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete an article. Returns true if it existed.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
