//! Bookshelf - GraphQL API for authors, books and users
//!
//! All operations are exposed via GraphQL at /graphql.

pub mod api;
pub mod app;
pub mod config;
pub mod db;
pub mod graphql;
pub mod services;
