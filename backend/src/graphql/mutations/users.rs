use super::prelude::*;

#[derive(Default)]
pub struct UserMutations;

#[Object]
impl UserMutations {
    /// Register a user. The password is stored as a bcrypt hash.
    async fn add_user(
        &self,
        ctx: &Context<'_>,
        fullname: String,
        username: String,
        password: String,
    ) -> Result<User> {
        let auth = ctx.data_unchecked::<AuthService>();
        let record = auth
            .register(RegisterInput {
                fullname,
                username,
                password,
            })
            .await
            .or_api_error()?;
        Ok(record.into())
    }

    /// Check credentials. Same lookup as `getUser`; no session is created.
    async fn login(
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

        info!(username = %username, success = user.is_some(), "Login attempt");
        Ok(user.map(User::from))
    }
}
