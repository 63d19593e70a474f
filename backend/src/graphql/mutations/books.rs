use super::prelude::*;

#[derive(Default)]
pub struct BookMutations;

#[Object]
impl BookMutations {
    /// Create a book. The author id is stored as given, even if unknown.
    async fn add_book(
        &self,
        ctx: &Context<'_>,
        name: String,
        genre: String,
        author_id: ID,
    ) -> Result<Book> {
        let db = ctx.data_unchecked::<Database>();
        let record = db
            .books()
            .create(CreateBook {
                name,
                genre,
                author_id: author_id.0,
            })
            .await
            .or_api_error()?;

        info!(book_id = %record.id, author_id = %record.author_id, "Book created");
        Ok(record.into())
    }

    /// Delete a book, returning it, or null if no such book
    async fn delete_book(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Book>> {
        let db = ctx.data_unchecked::<Database>();
        let record = db.books().delete(id.as_str()).await.or_api_error()?;

        info!(book_id = %id.as_str(), found = record.is_some(), "Book deleted");
        Ok(record.map(Book::from))
    }
}
