//! The authorization gate: a JWT-based authentication extractor.
//!
//! Every protected handler takes an [`AuthUser`] parameter. Extraction
//! verifies the bearer token, resolves the identity against the store
//! (excluding the password hash), and rejects deactivated accounts. The
//! gate is strictly read-only against the store.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use prodhub_core::error::CoreError;
use prodhub_core::types::{DbId, Timestamp};
use prodhub_db::repositories::UserRepo;

use crate::auth::jwt::{verify_token, TokenError};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated identity resolved from a `Authorization: Bearer <token>`
/// header. The projection deliberately omits the password hash.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = auth.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    pub name: String,
    pub email: String,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        let Some(token) = auth_header.strip_prefix("Bearer ") else {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Access denied. No valid token provided.".into(),
            )));
        };

        if token.trim().is_empty() {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Access denied. No token provided.".into(),
            )));
        }

        let claims = verify_token(token, &state.config.jwt).map_err(|e| {
            let message = match e {
                TokenError::Expired => "Token expired.",
                TokenError::Invalid => "Invalid token.",
            };
            AppError::Core(CoreError::Unauthorized(message.into()))
        })?;

        // A store failure here is a 500, not a 401: the credential itself
        // was fine.
        let user = UserRepo::find_by_id(&state.pool, claims.sub)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Identity resolution failed during authentication");
                AppError::InternalError(format!("Server error during authentication: {e}"))
            })?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Invalid token. User not found.".into()))
            })?;

        if !user.is_active {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Account is deactivated.".into(),
            )));
        }

        Ok(AuthUser {
            user_id: user.id,
            name: user.name,
            email: user.email,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        })
    }
}
