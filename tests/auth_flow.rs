//! End-to-end tests for the authentication routes, driven in-process with
//! `tower::ServiceExt::oneshot` against the real router and the in-memory
//! user service.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use auth_api_rust::auth;
use auth_api_rust::database::models::User;
use auth_api_rust::routes::{app, AppState};
use auth_api_rust::services::memory::MemoryUserService;
use auth_api_rust::services::{Credentials, NewUser, UserService, UserServiceError};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> Router {
    app(AppState::new(Arc::new(MemoryUserService::new())))
}

/// Wraps the in-memory service and counts delegate calls, so tests can
/// assert that validation failures never reach the collaborator.
struct CountingUserService {
    inner: MemoryUserService,
    calls: AtomicUsize,
}

impl CountingUserService {
    fn new() -> Self {
        Self {
            inner: MemoryUserService::new(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl UserService for CountingUserService {
    async fn create_user(&self, new_user: NewUser) -> Result<User, UserServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.create_user(new_user).await
    }

    async fn authenticate(&self, credentials: Credentials) -> Result<User, UserServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.authenticate(credentials).await
    }
}

struct ApiResponse {
    status: StatusCode,
    set_cookie: Option<String>,
    body: Value,
}

async fn post_json(app: Router, path: &str, body: Value) -> Result<ApiResponse> {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))?,
        )
        .await?;

    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let bytes = response.into_body().collect().await?.to_bytes();
    let body: Value = serde_json::from_slice(&bytes)?;

    Ok(ApiResponse { status, set_cookie, body })
}

fn cookie_value(set_cookie: &str) -> &str {
    let pair = set_cookie.split(';').next().unwrap_or_default();
    pair.strip_prefix("token=").unwrap_or_default()
}

#[tokio::test]
async fn sign_up_missing_email_returns_400_without_collaborator_call() -> Result<()> {
    let service = Arc::new(CountingUserService::new());
    let app = app(AppState::new(service.clone()));

    let res = post_json(app, "/api/auth/sign-up", json!({ "password": "secret123" })).await?;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "Validation failed");
    assert!(res.body["details"]["email"].is_string());
    assert!(res.set_cookie.is_none());
    assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    Ok(())
}

#[tokio::test]
async fn sign_up_rejects_malformed_email_and_short_password() -> Result<()> {
    let app = test_app();

    let res = post_json(
        app.clone(),
        "/api/auth/sign-up",
        json!({ "email": "not-an-email", "password": "secret123" }),
    )
    .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["details"]["email"].is_string());

    let res = post_json(
        app,
        "/api/auth/sign-up",
        json!({ "email": "a@x.com", "password": "short" }),
    )
    .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["details"]["password"].is_string());
    Ok(())
}

#[tokio::test]
async fn sign_in_missing_password_returns_400_without_collaborator_call() -> Result<()> {
    let service = Arc::new(CountingUserService::new());
    let app = app(AppState::new(service.clone()));

    let res = post_json(app, "/api/auth/sign-in", json!({ "email": "a@x.com" })).await?;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "Validation failed");
    assert!(res.body["details"]["password"].is_string());
    assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    Ok(())
}

#[tokio::test]
async fn sign_up_success_sets_token_cookie_and_returns_user() -> Result<()> {
    let app = test_app();

    let res = post_json(
        app,
        "/api/auth/sign-up",
        json!({ "name": "A", "email": "a@x.com", "password": "secret123" }),
    )
    .await?;

    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["message"], "User registered successfully");
    assert_eq!(res.body["user"]["email"], "a@x.com");
    assert_eq!(res.body["user"]["name"], "A");
    assert_eq!(res.body["user"]["role"], "user");
    assert!(res.body["user"]["id"].is_string());

    // No credential material in the body
    let user = res.body["user"].as_object().unwrap();
    assert!(!user.contains_key("password"));
    assert!(!user.contains_key("password_digest"));

    // Session cookie holds a token asserting this user's identity
    let set_cookie = res.set_cookie.expect("token cookie should be set");
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("HttpOnly"));
    let claims = auth::verify_jwt(cookie_value(&set_cookie)).expect("cookie should hold a valid token");
    assert_eq!(claims.email, "a@x.com");
    assert_eq!(claims.role, "user");
    Ok(())
}

#[tokio::test]
async fn duplicate_sign_up_returns_409_without_cookie() -> Result<()> {
    let app = test_app();
    let payload = json!({ "email": "a@x.com", "password": "secret123" });

    let first = post_json(app.clone(), "/api/auth/sign-up", payload.clone()).await?;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = post_json(app, "/api/auth/sign-up", payload).await?;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.body, json!({ "error": "Email already exists" }));
    assert!(second.set_cookie.is_none());
    Ok(())
}

#[tokio::test]
async fn sign_in_success_returns_user_and_fresh_cookie() -> Result<()> {
    let app = test_app();

    post_json(
        app.clone(),
        "/api/auth/sign-up",
        json!({ "name": "A", "email": "a@x.com", "password": "secret123" }),
    )
    .await?;

    let credentials = json!({ "email": "a@x.com", "password": "secret123" });

    let first = post_json(app.clone(), "/api/auth/sign-in", credentials.clone()).await?;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["message"], "User signed in successfully");
    assert_eq!(first.body["user"]["email"], "a@x.com");
    assert!(first.set_cookie.as_deref().unwrap_or_default().starts_with("token="));

    // Repeated sign-ins with the same credentials yield the identical user payload
    let second = post_json(app, "/api/auth/sign-in", credentials).await?;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["user"], first.body["user"]);
    assert!(second.set_cookie.is_some());
    Ok(())
}

#[tokio::test]
async fn sign_in_failure_gets_no_specific_status() -> Result<()> {
    let app = test_app();

    post_json(
        app.clone(),
        "/api/auth/sign-up",
        json!({ "email": "a@x.com", "password": "secret123" }),
    )
    .await?;

    for body in [
        json!({ "email": "a@x.com", "password": "wrong-password" }),
        json!({ "email": "nobody@x.com", "password": "secret123" }),
    ] {
        let res = post_json(app.clone(), "/api/auth/sign-in", body).await?;
        assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(res.body["error"].is_string());
        assert_ne!(res.body["error"], "Validation failed");
        assert!(res.set_cookie.is_none());
    }
    Ok(())
}

#[tokio::test]
async fn sign_out_always_clears_the_cookie() -> Result<()> {
    let app = test_app();

    // Without a prior session
    let res = post_json(app.clone(), "/api/auth/sign-out", json!({})).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!({ "message": "User signed out successfully" }));
    let set_cookie = res.set_cookie.expect("removal cookie should be set");
    assert_eq!(cookie_value(&set_cookie), "");

    // With a prior session cookie on the request
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/sign-out")
                .header(header::COOKIE, "token=some-previous-token")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("removal cookie should be set");
    assert_eq!(cookie_value(set_cookie), "");
    Ok(())
}

#[tokio::test]
async fn health_and_root_respond() -> Result<()> {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await?.to_bytes();
    let body: Value = serde_json::from_slice(&bytes)?;
    assert_eq!(body["data"]["status"], "ok");

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}
