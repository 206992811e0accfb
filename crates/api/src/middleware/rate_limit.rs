//! Fixed-window rate limiting for the authentication endpoints.
//!
//! A per-IP counter over a fixed window, held in process memory. This is a
//! policy gate applied before the register/login handlers run, not core
//! logic: exceeding the window yields an immediate 429 and the handler
//! never executes.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Configuration for the auth-endpoint rate limit.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window per client address.
    pub max_requests: u32,
    /// Window duration.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        // 5 attempts per 15 minutes.
        Self {
            max_requests: 5,
            window: Duration::from_secs(15 * 60),
        }
    }
}

impl RateLimitConfig {
    /// Load from `AUTH_RATE_LIMIT_MAX` / `AUTH_RATE_LIMIT_WINDOW_SECS`,
    /// falling back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let max_requests: u32 = std::env::var("AUTH_RATE_LIMIT_MAX")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_requests);

        let window_secs: u64 = std::env::var("AUTH_RATE_LIMIT_WINDOW_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.window.as_secs());

        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }
}

struct WindowEntry {
    count: u32,
    window_start: Instant,
}

/// Shared rate limiter state tracking request counts per client IP.
#[derive(Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    state: Arc<Mutex<HashMap<IpAddr, WindowEntry>>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            state: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Count one request for `ip` and report whether it is still within the
    /// window's budget. The counter resets when the window elapses.
    fn allow(&self, ip: IpAddr) -> bool {
        let mut state = self.state.lock().expect("rate limiter lock poisoned");
        let now = Instant::now();

        // Opportunistic cleanup so dead entries cannot accumulate.
        let window = self.config.window;
        if state.len() > 1024 {
            state.retain(|_, entry| now.duration_since(entry.window_start) < window);
        }

        let entry = state.entry(ip).or_insert(WindowEntry {
            count: 0,
            window_start: now,
        });

        if now.duration_since(entry.window_start) >= self.config.window {
            entry.count = 0;
            entry.window_start = now;
        }

        entry.count += 1;
        entry.count <= self.config.max_requests
    }
}

/// Middleware applying the fixed-window limit, keyed on the peer address.
///
/// Requests without connect info (only possible outside `axum::serve`, e.g.
/// in-process test routers) share a single placeholder bucket.
pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiter>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    if !limiter.allow(ip) {
        tracing::warn!(%ip, "Authentication rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            axum::Json(json!({
                "message": "Too many authentication attempts, please try again later."
            })),
        )
            .into_response();
    }

    next.run(request).await
}
