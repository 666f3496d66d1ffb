use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use crate::config;

/// Name of the session cookie carrying the signed token.
pub const SESSION_COOKIE: &str = "token";

/// Build the session cookie set on successful sign-up/sign-in.
///
/// HttpOnly and path-scoped to the whole site; lifetime matches the token
/// expiry so the cookie and the claims inside it age out together.
pub fn session_cookie(token: String) -> Cookie<'static> {
    let security = &config::config().security;

    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(security.cookie_secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::hours(security.jwt_expiry_hours as i64))
        .build()
}

/// Build the removal cookie set on sign-out.
pub fn clear_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .path("/")
        .build();

    cookie.make_removal();
    cookie
}
