use super::prelude::*;

#[derive(Default)]
pub struct BookQueries;

#[Object]
impl BookQueries {
    /// Get a book by id. Returns null when the id is omitted or unknown.
    async fn book(&self, ctx: &Context<'_>, id: Option<ID>) -> Result<Option<Book>> {
        let Some(id) = id else {
            return Ok(None);
        };
        let db = ctx.data_unchecked::<Database>();
        let record = db.books().get_by_id(id.as_str()).await.or_api_error()?;
        Ok(record.map(Book::from))
    }

    /// Get all books
    async fn books(&self, ctx: &Context<'_>) -> Result<Vec<Book>> {
        let db = ctx.data_unchecked::<Database>();
        let records = db.books().list().await.or_api_error()?;
        Ok(records.into_iter().map(Book::from).collect())
    }
}
