pub mod auth;
pub mod health;
pub mod notes;
pub mod todos;

use axum::http::StatusCode;
use axum::Json;
use axum::Router;
use serde_json::json;

use crate::middleware::rate_limit::RateLimiter;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /auth/register   register (public, rate limited)
/// /auth/login      login (public, rate limited)
/// /auth/me         current identity (requires auth)
///
/// /notes           list, create
/// /notes/{id}      update, delete
///
/// /todos           list, create
/// /todos/{id}      update, delete
/// ```
pub fn api_routes(limiter: RateLimiter) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router(limiter))
        .nest("/notes", notes::router())
        .nest("/todos", todos::router())
}

/// Fallback for unmatched routes: a generic 404 with no further detail.
pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Route not found" })),
    )
}
