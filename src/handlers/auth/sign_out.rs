use axum::{http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::CookieJar;
use serde_json::json;

use crate::auth::cookies;

/// POST /api/auth/sign-out - End the session
///
/// No input. Clears the `token` cookie and answers 200 whether or not a
/// session cookie was present on the request.
pub async fn sign_out(jar: CookieJar) -> impl IntoResponse {
    let jar = jar.add(cookies::clear_session_cookie());

    tracing::info!("user signed out successfully");

    (
        StatusCode::OK,
        jar,
        Json(json!({ "message": "User signed out successfully" })),
    )
}
