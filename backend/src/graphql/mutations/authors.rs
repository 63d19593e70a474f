use super::prelude::*;

#[derive(Default)]
pub struct AuthorMutations;

#[Object]
impl AuthorMutations {
    /// Create an author
    async fn add_author(&self, ctx: &Context<'_>, name: String, age: i32) -> Result<Author> {
        let db = ctx.data_unchecked::<Database>();
        let record = db
            .authors()
            .create(CreateAuthor { name, age })
            .await
            .or_api_error()?;

        info!(author_id = %record.id, "Author created");
        Ok(record.into())
    }

    /// Delete an author together with all of its books.
    ///
    /// Both deletes run in one transaction, books first. Returns null if no
    /// author had this id (its books, if any, are still removed).
    async fn delete_author(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Author>> {
        let db = ctx.data_unchecked::<Database>();
        let result = db.delete_author_cascade(id.as_str()).await.or_api_error()?;

        info!(
            author_id = %id.as_str(),
            found = result.author.is_some(),
            removed_books = result.removed_books,
            "Author deleted"
        );
        Ok(result.author.map(Author::from))
    }
}
