//! Credential service
//!
//! Provides:
//! - User registration with bcrypt password hashing
//! - Credential checks (username + password) against the stored hash
//!
//! There are no sessions or tokens: a successful check just returns the user.
//!
//! bcrypt only reads the first 72 bytes of its input, so passwords are
//! reduced to a hex SHA-256 digest first. Every byte of the password then
//! takes part in the comparison.

use std::sync::Arc;

use bcrypt::{hash, verify};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::db::{CreateUser, Database, UserRecord};

/// Hashed once per service and checked against when a username is unknown
const DUMMY_PASSWORD: &str = "bookshelf-unknown-user";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("failed to hash password: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("password hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Input for [AuthService::register]
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub fullname: String,
    pub username: String,
    pub password: String,
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: Database,
    bcrypt_cost: u32,
    dummy_hash: Arc<OnceCell<String>>,
}

impl AuthService {
    /// Create a new auth service hashing with the given bcrypt cost
    pub fn new(db: Database, bcrypt_cost: u32) -> Self {
        Self {
            db,
            bcrypt_cost,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Hash the password and store a new user
    pub async fn register(&self, input: RegisterInput) -> Result<UserRecord, AuthError> {
        let password_hash = self.hash_password(&input.password).await?;

        let user = self
            .db
            .users()
            .create(CreateUser {
                fullname: input.fullname,
                username: input.username,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Find a user whose username matches exactly and whose stored hash
    /// verifies against `password`.
    ///
    /// Usernames are not unique, so every user with that name is tried in
    /// insertion order. A hash that fails to parse counts as a mismatch.
    /// An unknown username still costs one bcrypt verification.
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserRecord>, AuthError> {
        let candidates = self.db.users().list_by_username(username).await?;
        let digest = password_digest(password);

        if candidates.is_empty() {
            let dummy = self.dummy_hash().await?;
            let _ = verify_digest(digest, dummy.clone()).await?;
            debug!(username, "Credential check found no match");
            return Ok(None);
        }

        for user in candidates {
            match verify_digest(digest.clone(), user.password_hash.clone()).await? {
                Ok(true) => {
                    debug!(user_id = %user.id, "Credentials verified");
                    return Ok(Some(user));
                }
                Ok(false) => {}
                Err(e) => {
                    warn!(user_id = %user.id, error = %e, "Stored password hash is unreadable");
                }
            }
        }

        debug!(username, "Credential check found no match");
        Ok(None)
    }

    /// Hash a password with bcrypt off the async runtime
    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let cost = self.bcrypt_cost;
        let digest = password_digest(password);
        let hashed = tokio::task::spawn_blocking(move || hash(digest, cost)).await??;
        Ok(hashed)
    }

    async fn dummy_hash(&self) -> Result<&String, AuthError> {
        self.dummy_hash
            .get_or_try_init(|| self.hash_password(DUMMY_PASSWORD))
            .await
    }
}

/// Hex SHA-256 of the password: 64 bytes, inside bcrypt's input limit
fn password_digest(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

async fn verify_digest(
    digest: String,
    stored: String,
) -> Result<bcrypt::BcryptResult<bool>, tokio::task::JoinError> {
    tokio::task::spawn_blocking(move || verify(digest, &stored)).await
}
