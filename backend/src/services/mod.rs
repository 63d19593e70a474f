//! Application services

pub mod auth;
pub mod logging;

pub use auth::{AuthError, AuthService, RegisterInput};
pub use logging::init_tracing;
