//! GraphQL object types
//!
//! `Book` and `Author` refer to each other. Each side only holds the id of
//! the other; the related object is loaded when the field is requested.

use async_graphql::dataloader::DataLoader;
use async_graphql::{ComplexObject, Context, ID, Result, SimpleObject};

use crate::db::{AuthorRecord, BookRecord, UserRecord};

use super::helpers::ApiResultExt;
use super::loaders::{AuthorLoader, BooksByAuthorLoader};

#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Book {
    pub id: ID,
    pub name: String,
    pub genre: String,
    /// Id of the owning author. The author may no longer exist.
    pub author_id: ID,
}

#[ComplexObject]
impl Book {
    /// The author of this book, or null if it no longer exists
    async fn author(&self, ctx: &Context<'_>) -> Result<Option<Author>> {
        let loader = ctx.data::<DataLoader<AuthorLoader>>()?;
        let author = loader
            .load_one(self.author_id.to_string())
            .await
            .or_api_error()?;
        Ok(author.map(Author::from))
    }
}

impl From<BookRecord> for Book {
    fn from(r: BookRecord) -> Self {
        Self {
            id: ID(r.id),
            name: r.name,
            genre: r.genre,
            author_id: ID(r.author_id),
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Author {
    pub id: ID,
    pub name: String,
    pub age: i32,
}

#[ComplexObject]
impl Author {
    /// Books referencing this author
    async fn book(&self, ctx: &Context<'_>) -> Result<Vec<Book>> {
        let loader = ctx.data::<DataLoader<BooksByAuthorLoader>>()?;
        let books = loader
            .load_one(self.id.to_string())
            .await
            .or_api_error()?
            .unwrap_or_default();
        Ok(books.into_iter().map(Book::from).collect())
    }
}

impl From<AuthorRecord> for Author {
    fn from(r: AuthorRecord) -> Self {
        Self {
            id: ID(r.id),
            name: r.name,
            age: r.age,
        }
    }
}

/// A registered user. The password hash is never exposed.
#[derive(Debug, Clone, SimpleObject)]
pub struct User {
    pub id: ID,
    pub fullname: String,
    pub username: String,
}

impl From<UserRecord> for User {
    fn from(r: UserRecord) -> Self {
        Self {
            id: ID(r.id),
            fullname: r.fullname,
            username: r.username,
        }
    }
}
