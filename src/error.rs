// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::api::format::format_validation_errors;
use crate::auth::JwtError;
use crate::services::UserServiceError;

/// HTTP API error with appropriate status codes and client-friendly messages.
///
/// Validation failures and the one recognized domain conflict (duplicate
/// email) are answered inline with their own status codes. Every other
/// failure collapses to an opaque 500 via the `From` conversions below, which
/// log the real cause and keep the body generic.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    ValidationError { field_errors: HashMap<String, String> },

    // 409 Conflict
    Conflict(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::ValidationError { .. } => 400,
            ApiError::Conflict(_) => 409,
            ApiError::InternalServerError(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::ValidationError { .. } => "Validation failed",
            ApiError::Conflict(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::ValidationError { field_errors } => {
                json!({
                    "error": "Validation failed",
                    "details": field_errors,
                })
            }
            _ => {
                json!({ "error": self.message() })
            }
        }
    }

    pub fn validation_error(field_errors: HashMap<String, String>) -> Self {
        ApiError::ValidationError { field_errors }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::validation_error(format_validation_errors(&errors))
    }
}

impl From<UserServiceError> for ApiError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::DuplicateEmail => ApiError::conflict("Email already exists"),
            UserServiceError::InvalidCredentials => {
                tracing::warn!("authentication rejected: invalid credentials");
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            UserServiceError::Database(msg) => {
                // Don't expose internal database errors to clients
                tracing::error!("user service database error: {}", msg);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        tracing::error!("token issuance failed: {}", err);
        ApiError::internal_server_error("An error occurred while processing your request")
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}
