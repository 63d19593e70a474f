//! Books repository
//!
//! `author_id` is a plain reference: nothing checks that the author exists.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Sqlite, SqlitePool};

use super::sqlite_helpers::{new_record_id, now_iso8601, placeholders};

const COLUMNS: &str = "id, name, genre, author_id, created_at";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BookRecord {
    pub id: String,
    pub name: String,
    pub genre: String,
    pub author_id: String,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct CreateBook {
    pub name: String,
    pub genre: String,
    pub author_id: String,
}

pub struct BookRepository {
    pool: SqlitePool,
}

impl BookRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new book
    pub async fn create(&self, input: CreateBook) -> Result<BookRecord> {
        let record = sqlx::query_as::<_, BookRecord>(&format!(
            "INSERT INTO books (id, name, genre, author_id, created_at) VALUES (?, ?, ?, ?, ?) RETURNING {COLUMNS}"
        ))
        .bind(new_record_id())
        .bind(&input.name)
        .bind(&input.genre)
        .bind(&input.author_id)
        .bind(now_iso8601())
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: &str) -> Result<Option<BookRecord>> {
        let record = sqlx::query_as::<_, BookRecord>(&format!(
            "SELECT {COLUMNS} FROM books WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// List all books in insertion order
    pub async fn list(&self) -> Result<Vec<BookRecord>> {
        let records = sqlx::query_as::<_, BookRecord>(&format!(
            "SELECT {COLUMNS} FROM books ORDER BY rowid"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// List the books written by one author
    pub async fn list_by_author(&self, author_id: &str) -> Result<Vec<BookRecord>> {
        self.list_by_authors(&[author_id.to_string()]).await
    }

    /// List the books of several authors at once, in insertion order
    pub async fn list_by_authors(&self, author_ids: &[String]) -> Result<Vec<BookRecord>> {
        if author_ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {COLUMNS} FROM books WHERE author_id IN ({}) ORDER BY rowid",
            placeholders(author_ids.len())
        );
        let mut query = sqlx::query_as::<_, BookRecord>(&sql);
        for id in author_ids {
            query = query.bind(id);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Delete a book by id, returning the removed record
    pub async fn delete(&self, id: &str) -> Result<Option<BookRecord>> {
        let record = sqlx::query_as::<_, BookRecord>(&format!(
            "DELETE FROM books WHERE id = ? RETURNING {COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Delete every book of an author, returning how many were removed
    pub async fn delete_by_author(&self, author_id: &str) -> Result<u64> {
        delete_by_author_with(&self.pool, author_id).await
    }
}

pub(super) async fn delete_by_author_with<'e, E>(executor: E, author_id: &str) -> Result<u64>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM books WHERE author_id = ?")
        .bind(author_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}
