//! User Repository

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::{BaseRepository, RepoError, RepoResult, map_unique_violation};
use crate::db::models::User;

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            base: BaseRepository::new(pool),
        }
    }

    /// Find user by username
    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(self.base.pool())
        .await?;
        Ok(row.map(User::from))
    }

    /// Find user by id
    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, username, password_hash, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.base.pool())
        .await?;
        Ok(row.map(User::from))
    }

    /// Register a new user. The raw password is hashed before storage and
    /// never written anywhere.
    pub async fn create(&self, username: &str, password: &str) -> RepoResult<User> {
        let password_hash = User::hash_password(password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))?;

        let row: UserRow = sqlx::query_as(
            r#"INSERT INTO users (username, password_hash, created_at)
               VALUES (?, ?, ?)
               RETURNING id, username, password_hash, created_at"#,
        )
        .bind(username)
        .bind(&password_hash)
        .bind(Utc::now())
        .fetch_one(self.base.pool())
        .await
        .map_err(|e| map_unique_violation(e, format!("Username '{username}' already exists")))?;

        Ok(row.into())
    }
}
