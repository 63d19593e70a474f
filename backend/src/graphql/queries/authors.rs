use super::prelude::*;

#[derive(Default)]
pub struct AuthorQueries;

#[Object]
impl AuthorQueries {
    /// Get an author by id. Returns null when the id is omitted or unknown.
    async fn author(&self, ctx: &Context<'_>, id: Option<ID>) -> Result<Option<Author>> {
        let Some(id) = id else {
            return Ok(None);
        };
        let db = ctx.data_unchecked::<Database>();
        let record = db.authors().get_by_id(id.as_str()).await.or_api_error()?;
        Ok(record.map(Author::from))
    }

    /// Get all authors
    async fn authors(&self, ctx: &Context<'_>) -> Result<Vec<Author>> {
        let db = ctx.data_unchecked::<Database>();
        let records = db.authors().list().await.or_api_error()?;
        Ok(records.into_iter().map(Author::from).collect())
    }
}
