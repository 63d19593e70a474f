use super::prelude::*;

#[derive(Default)]
pub struct UserQueries;

#[Object]
impl UserQueries {
    /// Get all users
    async fn all_users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let db = ctx.data_unchecked::<Database>();
        let records = db.users().list().await.or_api_error()?;
        Ok(records.into_iter().map(User::from).collect())
    }

    /// Get the user matching both username and password, if any
    async fn get_user(
        &self,
        ctx: &Context<'_>,
        username: String,
        password: String,
    ) -> Result<Option<User>> {
        let auth = ctx.data_unchecked::<AuthService>();
        let user = auth
            .verify_credentials(&username, &password)
            .await
            .or_api_error()?;
        Ok(user.map(User::from))
    }
}
