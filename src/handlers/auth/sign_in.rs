use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::CookieJar;
use serde_json::json;

use crate::auth::{self, cookies, Claims};
use crate::database::models::PublicUser;
use crate::error::ApiError;
use crate::routes::AppState;
use crate::services::Credentials;
use crate::validation::SignInRequest;

/// POST /api/auth/sign-in - Verify credentials and start a session
///
/// Expected Input:
/// ```json
/// {
///   "email": "string",      // Required
///   "password": "string"    // Required
/// }
/// ```
///
/// Responses:
/// - 200 `{message, user}` with a fresh `token` session cookie
/// - 400 `{error: "Validation failed", details}` - no collaborator is called
/// - 500 generic body for every delegation failure; bad credentials and
///   unknown email get no special status here
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<SignInRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let data = payload.into_validated()?;

    let user = state
        .users
        .authenticate(Credentials {
            email: data.email,
            password: data.password,
        })
        .await?;

    let token = auth::generate_jwt(&Claims::new(user.id, user.email.clone(), user.role.clone()))?;
    let jar = jar.add(cookies::session_cookie(token));

    tracing::info!(email = %user.email, "user signed in successfully");

    Ok((
        StatusCode::OK,
        jar,
        Json(json!({
            "message": "User signed in successfully",
            "user": PublicUser::from(&user),
        })),
    ))
}
