//! Users repository
//!
//! Stores only the password hash. Usernames are not unique.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use super::sqlite_helpers::{new_record_id, now_iso8601};

const COLUMNS: &str = "id, fullname, username, password_hash, created_at";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserRecord {
    pub id: String,
    pub fullname: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct CreateUser {
    pub fullname: String,
    pub username: String,
    pub password_hash: String,
}

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user
    pub async fn create(&self, user: CreateUser) -> Result<UserRecord> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "INSERT INTO users (id, fullname, username, password_hash, created_at) VALUES (?, ?, ?, ?, ?) RETURNING {COLUMNS}"
        ))
        .bind(new_record_id())
        .bind(&user.fullname)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(now_iso8601())
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: &str) -> Result<Option<UserRecord>> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Get every user with exactly this username (case-sensitive)
    pub async fn list_by_username(&self, username: &str) -> Result<Vec<UserRecord>> {
        let records = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {COLUMNS} FROM users WHERE username = ? ORDER BY rowid"
        ))
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// List all users in insertion order
    pub async fn list(&self) -> Result<Vec<UserRecord>> {
        let records = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {COLUMNS} FROM users ORDER BY rowid"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
