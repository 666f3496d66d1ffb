//! Request schemas for the authentication endpoints.
//!
//! Fields are deserialized as `Option` so a missing field surfaces as a
//! structured validation error (400 with per-field details) instead of a
//! serde rejection. `into_validated` runs the schema and hands back the
//! required fields unwrapped.

use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

/// Role assigned when a sign-up request does not specify one.
pub const DEFAULT_ROLE: &str = "user";

#[derive(Debug, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: Option<String>,

    #[validate(required(message = "Email is required"), email(message = "Invalid email address"))]
    pub email: Option<String>,

    #[validate(
        required(message = "Password is required"),
        length(min = 8, max = 128, message = "Password must be between 8 and 128 characters")
    )]
    pub password: Option<String>,

    #[validate(custom(function = validate_role))]
    pub role: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(required(message = "Email is required"), email(message = "Invalid email address"))]
    pub email: Option<String>,

    #[validate(required(message = "Password is required"), length(min = 1, message = "Password is required"))]
    pub password: Option<String>,
}

/// Validated sign-up payload with required fields unwrapped.
#[derive(Debug)]
pub struct SignUpData {
    pub name: Option<String>,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Validated sign-in payload.
#[derive(Debug)]
pub struct SignInData {
    pub email: String,
    pub password: String,
}

impl SignUpRequest {
    pub fn into_validated(self) -> Result<SignUpData, ValidationErrors> {
        self.validate()?;

        Ok(SignUpData {
            name: self.name,
            // Required fields are guaranteed Some once validation passes
            email: self.email.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
            role: self.role.unwrap_or_else(|| DEFAULT_ROLE.to_string()),
        })
    }
}

impl SignInRequest {
    pub fn into_validated(self) -> Result<SignInData, ValidationErrors> {
        self.validate()?;

        Ok(SignInData {
            email: self.email.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
        })
    }
}

fn validate_role(role: &str) -> Result<(), ValidationError> {
    match role {
        "user" | "admin" => Ok(()),
        _ => {
            let mut err = ValidationError::new("role");
            err.message = Some("Role must be one of: user, admin".into());
            Err(err)
        }
    }
}
