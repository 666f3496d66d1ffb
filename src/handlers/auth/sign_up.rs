use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::CookieJar;
use serde_json::json;

use crate::auth::{self, cookies, Claims};
use crate::database::models::PublicUser;
use crate::error::ApiError;
use crate::routes::AppState;
use crate::services::NewUser;
use crate::validation::SignUpRequest;

/// POST /api/auth/sign-up - Create an account and start a session
///
/// Expected Input:
/// ```json
/// {
///   "name": "string",       // Optional: display name
///   "email": "string",      // Required: unique email address
///   "password": "string",   // Required: 8-128 characters
///   "role": "string"        // Optional: "user" (default) or "admin"
/// }
/// ```
///
/// Responses:
/// - 201 `{message, user}` with the `token` session cookie set
/// - 400 `{error: "Validation failed", details}` - no collaborator is called
/// - 409 `{error: "Email already exists"}` - no cookie is set
/// - 500 generic body for any other service or token failure
pub async fn sign_up(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<SignUpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let data = payload.into_validated()?;

    let user = state
        .users
        .create_user(NewUser {
            name: data.name,
            email: data.email,
            password: data.password,
            role: data.role,
        })
        .await?;

    let token = auth::generate_jwt(&Claims::new(user.id, user.email.clone(), user.role.clone()))?;
    let jar = jar.add(cookies::session_cookie(token));

    tracing::info!(email = %user.email, "user registered successfully");

    Ok((
        StatusCode::CREATED,
        jar,
        Json(json!({
            "message": "User registered successfully",
            "user": PublicUser::from(&user),
        })),
    ))
}
