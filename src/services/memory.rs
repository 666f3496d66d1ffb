use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{hash_password, Credentials, NewUser, UserService, UserServiceError};
use crate::database::models::User;

/// In-process user store, keyed by email.
///
/// Used in development when no `DATABASE_URL` is configured, and by the test
/// suite. Nothing is persisted across restarts.
#[derive(Debug, Default)]
pub struct MemoryUserService {
    users: Mutex<HashMap<String, User>>,
}

impl MemoryUserService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserService for MemoryUserService {
    async fn create_user(&self, new_user: NewUser) -> Result<User, UserServiceError> {
        let mut users = self
            .users
            .lock()
            .map_err(|_| UserServiceError::Database("user store lock poisoned".to_string()))?;

        if users.contains_key(&new_user.email) {
            return Err(UserServiceError::DuplicateEmail);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email.clone(),
            role: new_user.role,
            password_digest: hash_password(&new_user.password),
            created_at: now,
            updated_at: now,
        };

        users.insert(new_user.email, user.clone());
        Ok(user)
    }

    async fn authenticate(&self, credentials: Credentials) -> Result<User, UserServiceError> {
        let users = self
            .users
            .lock()
            .map_err(|_| UserServiceError::Database("user store lock poisoned".to_string()))?;

        let user = users
            .get(&credentials.email)
            .ok_or(UserServiceError::InvalidCredentials)?;

        if user.password_digest != hash_password(&credentials.password) {
            return Err(UserServiceError::InvalidCredentials);
        }

        Ok(user.clone())
    }
}
