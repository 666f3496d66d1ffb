use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{hash_password, Credentials, NewUser, UserService, UserServiceError};
use crate::database::models::User;

// Postgres class 23 integrity violation for duplicate keys
const UNIQUE_VIOLATION: &str = "23505";

/// Postgres-backed user store.
///
/// Expects a `users` table:
///
/// ```sql
/// CREATE TABLE users (
///     id uuid PRIMARY KEY,
///     name text,
///     email text NOT NULL UNIQUE,
///     role text NOT NULL,
///     password_digest text NOT NULL,
///     created_at timestamptz NOT NULL,
///     updated_at timestamptz NOT NULL
/// );
/// ```
pub struct PostgresUserService {
    pool: PgPool,
}

impl PostgresUserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserService for PostgresUserService {
    async fn create_user(&self, new_user: NewUser) -> Result<User, UserServiceError> {
        let digest = hash_password(&new_user.password);

        // The unique index on email is the duplicate check; racing inserts
        // both resolve correctly through the constraint.
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, name, email, role, password_digest, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, now(), now()) \
             RETURNING id, name, email, role, password_digest, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.role)
        .bind(&digest)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                UserServiceError::DuplicateEmail
            }
            _ => UserServiceError::Database(e.to_string()),
        })
    }

    async fn authenticate(&self, credentials: Credentials) -> Result<User, UserServiceError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, role, password_digest, created_at, updated_at \
             FROM users WHERE email = $1",
        )
        .bind(&credentials.email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserServiceError::Database(e.to_string()))?
        .ok_or(UserServiceError::InvalidCredentials)?;

        if user.password_digest != hash_password(&credentials.password) {
            return Err(UserServiceError::InvalidCredentials);
        }

        Ok(user)
    }
}
