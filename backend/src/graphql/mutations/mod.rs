pub mod authors;
pub mod books;
pub mod users;

pub use authors::AuthorMutations;
pub use books::BookMutations;
pub use users::UserMutations;

pub(crate) mod prelude {
    pub(crate) use async_graphql::{Context, ID, Object, Result};
    pub(crate) use tracing::info;

    pub(crate) use crate::db::{CreateAuthor, CreateBook, Database};
    pub(crate) use crate::graphql::helpers::ApiResultExt;
    pub(crate) use crate::graphql::types::*;
    pub(crate) use crate::services::{AuthService, RegisterInput};
}
