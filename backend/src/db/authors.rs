//! Authors repository

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Sqlite, SqlitePool};

use super::sqlite_helpers::{new_record_id, now_iso8601, placeholders};

const COLUMNS: &str = "id, name, age, created_at";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AuthorRecord {
    pub id: String,
    pub name: String,
    pub age: i32,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct CreateAuthor {
    pub name: String,
    pub age: i32,
}

pub struct AuthorRepository {
    pool: SqlitePool,
}

impl AuthorRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new author; the id is assigned here
    pub async fn create(&self, input: CreateAuthor) -> Result<AuthorRecord> {
        let record = sqlx::query_as::<_, AuthorRecord>(&format!(
            "INSERT INTO authors (id, name, age, created_at) VALUES (?, ?, ?, ?) RETURNING {COLUMNS}"
        ))
        .bind(new_record_id())
        .bind(&input.name)
        .bind(input.age)
        .bind(now_iso8601())
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Get author by ID
    pub async fn get_by_id(&self, id: &str) -> Result<Option<AuthorRecord>> {
        let record = sqlx::query_as::<_, AuthorRecord>(&format!(
            "SELECT {COLUMNS} FROM authors WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Get every author whose id is in `ids`. Unknown ids are skipped.
    pub async fn get_by_ids(&self, ids: &[String]) -> Result<Vec<AuthorRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {COLUMNS} FROM authors WHERE id IN ({})",
            placeholders(ids.len())
        );
        let mut query = sqlx::query_as::<_, AuthorRecord>(&sql);
        for id in ids {
            query = query.bind(id);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    /// List all authors in insertion order
    pub async fn list(&self) -> Result<Vec<AuthorRecord>> {
        let records = sqlx::query_as::<_, AuthorRecord>(&format!(
            "SELECT {COLUMNS} FROM authors ORDER BY rowid"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Delete an author by id, returning the removed record.
    ///
    /// Books are left untouched; see [Database::delete_author_cascade](super::Database::delete_author_cascade).
    pub async fn delete(&self, id: &str) -> Result<Option<AuthorRecord>> {
        delete_with(&self.pool, id).await
    }
}

pub(super) async fn delete_with<'e, E>(executor: E, id: &str) -> Result<Option<AuthorRecord>>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let record = sqlx::query_as::<_, AuthorRecord>(&format!(
        "DELETE FROM authors WHERE id = ? RETURNING {COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(record)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::db::Database;

    fn author(name: &str, age: i32) -> CreateAuthor {
        CreateAuthor {
            name: name.to_string(),
            age,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let db = Database::in_memory().await.unwrap();
        let created = db.authors().create(author("Ada", 30)).await.unwrap();

        assert!(!created.id.is_empty());
        assert_eq!(created.name, "Ada");
        assert_eq!(created.age, 30);

        let fetched = db.authors().get_by_id(&created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.authors();
        for (name, age) in [("Zed", 50), ("Amy", 20), ("Max", 35)] {
            repo.create(author(name, age)).await.unwrap();
        }

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["Zed", "Amy", "Max"]);
    }

    #[tokio::test]
    async fn test_get_by_ids_skips_unknown() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.authors();
        let a = repo.create(author("A", 1)).await.unwrap();
        let b = repo.create(author("B", 2)).await.unwrap();

        let mut found = repo
            .get_by_ids(&[a.id.clone(), "nope".to_string(), b.id.clone()])
            .await
            .unwrap();
        found.sort_by(|x, y| x.name.cmp(&y.name));
        assert_eq!(found, vec![a, b]);

        assert!(repo.get_by_ids(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_returns_removed_record() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.authors();
        let a = repo.create(author("Ada", 30)).await.unwrap();

        assert_eq!(repo.delete(&a.id).await.unwrap(), Some(a.clone()));
        assert_eq!(repo.delete(&a.id).await.unwrap(), None);
        assert!(repo.get_by_id(&a.id).await.unwrap().is_none());
    }
}
