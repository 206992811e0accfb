use crate::auth::jwt::JwtConfig;
use crate::middleware::rate_limit::RateLimitConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except `JWT_SECRET` have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Whether the server runs in production mode (`APP_ENV` == "production").
    pub production: bool,
    /// JWT token configuration (secret, expiry window).
    pub jwt: JwtConfig,
    /// Fixed-window rate limit applied to the register/login endpoints.
    pub auth_rate_limit: RateLimitConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                  |
    /// |-------------------------------|--------------------------|
    /// | `HOST`                        | `0.0.0.0`                |
    /// | `PORT`                        | `5000`                   |
    /// | `CORS_ORIGINS`                | `http://localhost:5173,http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`                     |
    /// | `APP_ENV`                     | `development`            |
    /// | `AUTH_RATE_LIMIT_MAX`         | `5`                      |
    /// | `AUTH_RATE_LIMIT_WINDOW_SECS` | `900`                    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173,http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let production =
            std::env::var("APP_ENV").unwrap_or_else(|_| "development".into()) == "production";

        let jwt = JwtConfig::from_env();
        let auth_rate_limit = RateLimitConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            production,
            jwt,
            auth_rate_limit,
        }
    }
}
