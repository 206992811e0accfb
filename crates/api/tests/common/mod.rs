//! Shared helpers for HTTP-level integration tests.
//!
//! Uses `tower::ServiceExt::oneshot` to send requests directly to the
//! router without a TCP listener. The router comes from the same
//! [`build_app_router`] the binary uses, so tests exercise the exact
//! middleware stack that production runs.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use prodhub_api::auth::jwt::{generate_token, JwtConfig};
use prodhub_api::auth::password::hash_password;
use prodhub_api::config::ServerConfig;
use prodhub_api::middleware::rate_limit::RateLimitConfig;
use prodhub_api::router::build_app_router;
use prodhub_api::state::AppState;
use prodhub_core::types::DbId;
use prodhub_db::models::user::CreateUser;
use prodhub_db::repositories::UserRepo;

/// JWT settings shared by the test app and by directly minted tokens.
pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-not-for-production".to_string(),
        expiry_days: 7,
    }
}

/// Build a test `ServerConfig` with safe defaults and an effectively
/// unlimited auth rate limit (rate limiting has its own dedicated test).
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        production: false,
        jwt: test_jwt_config(),
        auth_rate_limit: RateLimitConfig {
            max_requests: 10_000,
            window: Duration::from_secs(900),
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and configuration.
///
/// Clones of the returned router share one rate-limit window, so a test
/// that exercises the limiter should build the app once and clone it per
/// request.
pub fn build_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Build the application router with default test configuration.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_with_config(pool, test_config())
}

/// Insert a user directly and mint a token for it, bypassing the HTTP
/// registration flow. Returns `(user_id, token)`.
pub async fn seed_user(pool: &PgPool, name: &str, email: &str) -> (DbId, String) {
    let hash = hash_password("seeded_password_123").expect("hashing should succeed");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: hash,
        },
    )
    .await
    .expect("user creation should succeed");

    let token = generate_token(user.id, &test_jwt_config()).expect("token minting should succeed");
    (user.id, token)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, Some(token)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), Some(token)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body), Some(token)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None, Some(token)).await
}

/// Collect a response body into parsed JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}
