use sqlx::sqlite::SqlitePool;

use crate::jwt::TokenSubject;

#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

/// User role for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "admin" => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    /// Argon2 PHC string
    pub password_hash: String,
    pub role: UserRole,
}

impl TokenSubject for User {
    fn token_id(&self) -> i64 {
        self.id
    }

    fn token_subject(&self) -> &str {
        &self.email
    }

    fn token_role(&self) -> Option<&str> {
        Some(self.role.as_str())
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password_hash: String,
    role: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            role: UserRole::from_str(&row.role),
        }
    }
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user with the default role. Returns the user ID.
    pub async fn create(&self, email: &str, password_hash: &str) -> Result<i64, sqlx::Error> {
        self.create_with_role(email, password_hash, UserRole::User)
            .await
    }

    /// Create a new user with an explicit role. Returns the user ID.
    pub async fn create_with_role(
        &self,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query("INSERT INTO users (email, password_hash, role) VALUES (?, ?, ?)")
            .bind(email)
            .bind(password_hash)
            .bind(role.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Get a user by email (case-insensitive).
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, email, password_hash, role FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(User::from))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT id, email, password_hash, role FROM users WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(User::from))
    }

    /// Set the role for a user.
    pub async fn set_role(&self, id: i64, role: UserRole) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET role = ? WHERE id = ?")
            .bind(role.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a user by ID.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
