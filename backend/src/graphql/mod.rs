//! GraphQL API
//!
//! This module provides the GraphQL API using async-graphql. It is the single
//! API surface of the service; the HTTP handlers live in [crate::api].
//!
//! Queries and mutations are split per entity under `queries/` and
//! `mutations/` and merged into the root types in `schema.rs`.

pub mod helpers;
pub mod loaders;
pub mod mutations;
pub mod queries;
mod schema;
pub mod types;

pub use loaders::attach_loaders;
pub use schema::{BookshelfSchema, build_schema};
