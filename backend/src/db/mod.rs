//! Database connection and repositories
//!
//! One repository per collection (`authors`, `books`, `users`), each built on
//! demand from the shared pool. Multi-collection writes that must be atomic
//! live on [Database] itself.

pub mod authors;
pub mod books;
pub mod schema;
pub mod sqlite_helpers;
pub mod users;

use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{info, warn};

pub use authors::{AuthorRecord, AuthorRepository, CreateAuthor};
pub use books::{BookRecord, BookRepository, CreateBook};
pub use users::{CreateUser, UserRecord, UserRepository};

const RETRY_INTERVAL: Duration = Duration::from_secs(2);

/// Outcome of [Database::delete_author_cascade]
#[derive(Debug, Clone)]
pub struct CascadeDelete {
    /// The removed author, or `None` if no author had that id
    pub author: Option<AuthorRecord>,
    /// Number of books removed along with the author
    pub removed_books: u64,
}

/// Database wrapper providing connection pool access
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection pool
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("invalid database url: {url}"))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Connect, retrying every couple of seconds until `timeout` has elapsed
    pub async fn connect_with_retry(
        url: &str,
        max_connections: u32,
        timeout: Duration,
    ) -> Result<Self> {
        let deadline = Instant::now() + timeout;
        loop {
            match Self::connect(url, max_connections).await {
                Ok(db) => {
                    info!(max_connections, "Database connected");
                    return Ok(db);
                }
                Err(e) if Instant::now() + RETRY_INTERVAL < deadline => {
                    warn!(
                        error = %e,
                        retry_in_secs = RETRY_INTERVAL.as_secs(),
                        "Database connection failed, retrying"
                    );
                    tokio::time::sleep(RETRY_INTERVAL).await;
                }
                Err(e) => {
                    bail!("database connection failed after {}s: {e:#}", timeout.as_secs())
                }
            }
        }
    }

    /// Single-connection in-memory database with the schema applied.
    ///
    /// Every SQLite connection to `:memory:` is its own database, so the pool
    /// is pinned to one connection that never expires.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        let db = Self { pool };
        db.sync_schema().await?;
        Ok(db)
    }

    /// Create any missing tables
    pub async fn sync_schema(&self) -> Result<()> {
        schema::sync_schema(&self.pool).await
    }

    /// Verify the store answers queries
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close all pooled connections
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Get an author repository
    pub fn authors(&self) -> AuthorRepository {
        AuthorRepository::new(self.pool.clone())
    }

    /// Get a book repository
    pub fn books(&self) -> BookRepository {
        BookRepository::new(self.pool.clone())
    }

    /// Get a user repository
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    /// Remove an author and every book referencing it in one transaction.
    ///
    /// Books are removed first; the author delete only runs once that has
    /// completed. Any failure rolls both back.
    pub async fn delete_author_cascade(&self, id: &str) -> Result<CascadeDelete> {
        let mut tx = self.pool.begin().await?;

        let removed_books = books::delete_by_author_with(&mut *tx, id)
            .await
            .context("failed to delete books of author")?;
        let author = authors::delete_with(&mut *tx, id)
            .await
            .context("failed to delete author")?;

        tx.commit().await?;

        Ok(CascadeDelete {
            author,
            removed_books,
        })
    }
}
