pub mod authors;
pub mod books;
pub mod users;

pub use authors::AuthorQueries;
pub use books::BookQueries;
pub use users::UserQueries;

pub(crate) mod prelude {
    pub(crate) use async_graphql::{Context, ID, Object, Result};

    pub(crate) use crate::db::Database;
    pub(crate) use crate::graphql::helpers::ApiResultExt;
    pub(crate) use crate::graphql::types::*;
    pub(crate) use crate::services::AuthService;
}
