//! GraphQL DataLoaders for batching relation lookups
//!
//! DataLoaders solve the N+1 problem by collecting the keys requested by
//! sibling resolvers and fetching them in a single query.
//!
//! The pattern works as follows:
//! 1. When GraphQL resolves `authors { book { ... } }`, each Author's `book`
//!    resolver calls `loader.load_one(author_id)`
//! 2. DataLoader batches (and deduplicates) these calls within the same tick
//! 3. A single SQL query fetches all books for all authors:
//!    `SELECT ... FROM books WHERE author_id IN (...)`
//! 4. Results are grouped by author id and returned to each resolver
//!
//! `Book.author` works the same way through [AuthorLoader].
//!
//! Loaders are attached per request with [attach_loaders] and never cache
//! across requests.

use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::Request;
use async_graphql::dataloader::{DataLoader, Loader};

use crate::db::{AuthorRecord, BookRecord, Database};

/// Loads authors by id
pub struct AuthorLoader {
    db: Database,
}

impl AuthorLoader {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl Loader<String> for AuthorLoader {
    type Value = AuthorRecord;
    type Error = Arc<anyhow::Error>;

    async fn load(&self, keys: &[String]) -> Result<HashMap<String, Self::Value>, Self::Error> {
        tracing::debug!(entity = "authors", key_count = keys.len(), "Batch loading authors by id");

        let authors = self.db.authors().get_by_ids(keys).await.map_err(Arc::new)?;

        Ok(authors
            .into_iter()
            .map(|author| (author.id.clone(), author))
            .collect())
    }
}

/// Loads the books of each author, keyed by author id
pub struct BooksByAuthorLoader {
    db: Database,
}

impl BooksByAuthorLoader {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl Loader<String> for BooksByAuthorLoader {
    type Value = Vec<BookRecord>;
    type Error = Arc<anyhow::Error>;

    async fn load(&self, keys: &[String]) -> Result<HashMap<String, Self::Value>, Self::Error> {
        tracing::debug!(
            entity = "books",
            fk_column = "author_id",
            parent_count = keys.len(),
            "Batch loading books for {} authors",
            keys.len()
        );

        let books = self.db.books().list_by_authors(keys).await.map_err(Arc::new)?;
        let total_loaded = books.len();

        // Every requested author gets an entry, even with no books
        let mut result: HashMap<String, Vec<BookRecord>> =
            keys.iter().map(|k| (k.clone(), Vec::new())).collect();

        for book in books {
            if let Some(entries) = result.get_mut(&book.author_id) {
                entries.push(book);
            }
        }

        tracing::debug!(entity = "books", total_loaded, "Batch load complete");

        Ok(result)
    }
}

/// Attach fresh request-scoped loaders to a GraphQL request
pub fn attach_loaders(request: Request, db: &Database) -> Request {
    request
        .data(DataLoader::new(AuthorLoader::new(db.clone()), tokio::spawn))
        .data(DataLoader::new(
            BooksByAuthorLoader::new(db.clone()),
            tokio::spawn,
        ))
}
