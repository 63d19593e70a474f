//! HTTP route definitions
//!
//! The API is GraphQL at /graphql. Health probes live alongside it.

pub mod graphql;
pub mod health;
