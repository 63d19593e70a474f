//! Table bootstrap
//!
//! Creates the three collections if they are missing. There is no column
//! diffing or migration: the layout is fixed.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::{debug, info};

const TABLES: &[(&str, &str)] = &[
    (
        "authors",
        r#"
        CREATE TABLE IF NOT EXISTS authors (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            age INTEGER NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    ),
    (
        "books",
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            genre TEXT NOT NULL,
            author_id TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    ),
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY NOT NULL,
            fullname TEXT NOT NULL,
            username TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    ),
];

// books.author_id is not a foreign key: orphaned books are allowed.
const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_books_author_id ON books (author_id)",
    "CREATE INDEX IF NOT EXISTS idx_users_username ON users (username)",
];

/// Create any missing tables and indexes
pub async fn sync_schema(pool: &SqlitePool) -> Result<()> {
    for (table, ddl) in TABLES {
        sqlx::query(ddl)
            .execute(pool)
            .await
            .with_context(|| format!("failed to create table {table}"))?;
        debug!(table = *table, "Table ready");
    }

    for ddl in INDEXES {
        sqlx::query(ddl)
            .execute(pool)
            .await
            .with_context(|| format!("failed to create index: {ddl}"))?;
    }

    info!(tables = TABLES.len(), "Database schema synced");
    Ok(())
}
