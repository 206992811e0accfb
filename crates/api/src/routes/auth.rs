//! Route definitions for the `/auth` resource.

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::middleware::rate_limit::{rate_limit_middleware, RateLimiter};
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /register  -> register (rate limited)
/// POST /login     -> login (rate limited)
/// GET  /me        -> me (requires auth)
/// ```
///
/// The fixed-window limiter guards only the credential-handling endpoints;
/// `/me` is already gated by the token itself.
pub fn router(limiter: RateLimiter) -> Router<AppState> {
    let limited = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .layer(from_fn_with_state(limiter, rate_limit_middleware));

    limited.route("/me", get(auth::me))
}
