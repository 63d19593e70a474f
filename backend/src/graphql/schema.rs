//! GraphQL schema definition with queries and mutations
//!
//! Root types are merged from per-entity resolver sets. Type names follow the
//! public contract: `RootQueryType` and `Mutation`.

use async_graphql::extensions::Tracing;
use async_graphql::{EmptySubscription, MergedObject, Schema};

use crate::db::Database;
use crate::services::AuthService;

use super::mutations::{AuthorMutations, BookMutations, UserMutations};
use super::queries::{AuthorQueries, BookQueries, UserQueries};

#[derive(MergedObject, Default)]
#[graphql(name = "RootQueryType")]
pub struct QueryRoot(BookQueries, AuthorQueries, UserQueries);

#[derive(MergedObject, Default)]
#[graphql(name = "Mutation")]
pub struct MutationRoot(AuthorMutations, BookMutations, UserMutations);

/// The GraphQL schema type
pub type BookshelfSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the GraphQL schema with all resolvers.
///
/// Requests must go through [attach_loaders](super::attach_loaders) before
/// execution so relation fields can batch their lookups.
pub fn build_schema(db: Database, auth: AuthService) -> BookshelfSchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .data(db)
        .data(auth)
        .extension(Tracing)
        .finish()
}
