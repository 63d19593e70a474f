//! Resolver error mapping
//!
//! Store and credential failures become field-level errors carrying an
//! `extensions.code`, so sibling fields still resolve. Clients only see a
//! generic message; the underlying cause goes to the log.

use std::sync::Arc;

use async_graphql::ErrorExtensions;
use thiserror::Error;

use crate::services::AuthError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("persistence failure: {0}")]
    Persistence(String),

    #[error("credential failure: {0}")]
    Credential(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Persistence(_) => "PERSISTENCE_FAILURE",
            ApiError::Credential(_) => "CREDENTIAL_FAILURE",
        }
    }

    /// Message returned to clients, without store or hashing internals
    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::Persistence(_) => "persistence failure",
            ApiError::Credential(_) => "credential failure",
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.public_message())
            .extend_with(|_, e| e.set("code", self.code()))
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Persistence(format!("{e:#}"))
    }
}

impl From<Arc<anyhow::Error>> for ApiError {
    fn from(e: Arc<anyhow::Error>) -> Self {
        ApiError::Persistence(format!("{e:#}"))
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Store(e) => e.into(),
            other => ApiError::Credential(other.to_string()),
        }
    }
}

/// Convert store results into GraphQL results, logging the failure
pub trait ApiResultExt<T> {
    fn or_api_error(self) -> async_graphql::Result<T>;
}

impl<T, E> ApiResultExt<T> for Result<T, E>
where
    E: Into<ApiError>,
{
    fn or_api_error(self) -> async_graphql::Result<T> {
        self.map_err(|e| {
            let err: ApiError = e.into();
            tracing::error!(code = err.code(), error = %err, "Resolver failed");
            err.extend()
        })
    }
}
