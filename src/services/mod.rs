//! User service collaborators.
//!
//! The handlers never talk to storage directly; they delegate credential
//! creation and verification through [`UserService`]. Failures come back as
//! tagged [`UserServiceError`] variants so callers branch on kind, never on
//! message text.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::database::models::User;

/// Payload for account creation.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: Option<String>,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Payload for credential verification.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Error)]
pub enum UserServiceError {
    #[error("user with this email already exists")]
    DuplicateEmail,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("database error: {0}")]
    Database(String),
}

#[async_trait]
pub trait UserService: Send + Sync {
    /// Create an account. A taken email address comes back as
    /// [`UserServiceError::DuplicateEmail`].
    async fn create_user(&self, new_user: NewUser) -> Result<User, UserServiceError>;

    /// Verify credentials and return the matching user. Unknown email and
    /// wrong password are indistinguishable to the caller.
    async fn authenticate(&self, credentials: Credentials) -> Result<User, UserServiceError>;
}

/// Digest used for stored passwords.
pub(crate) fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}
