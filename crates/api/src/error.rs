use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use prodhub_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the API's `{"message": ...}`
/// JSON error bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `prodhub_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An internal error with a human-readable detail message. The detail
    /// is logged server-side, never sent to production clients.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Generic client-facing message for 500s. Detail stays in the logs.
const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, core.to_string(), None)
                }
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
                // Inherited convention: duplicate unique fields report 400,
                // not 409.
                CoreError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None),
            },

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_MESSAGE.to_string(),
                    Some(msg.clone()),
                )
            }
        };

        // Debug builds echo the withheld detail to ease diagnosis; release
        // builds never do.
        let body = match detail {
            Some(detail) if cfg!(debug_assertions) => {
                json!({ "message": message, "detail": detail })
            }
            _ => json!({ "message": message }),
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, message, and optional detail.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`)
///   map to the duplicate-email conflict message.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, String, Option<String>) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "Resource not found".to_string(),
            None,
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505.
            if db_err.code().as_deref() == Some("23505") {
                if let Some(constraint) = db_err.constraint() {
                    if constraint.starts_with("uq_") {
                        return (
                            StatusCode::BAD_REQUEST,
                            "User with this email already exists".to_string(),
                            None,
                        );
                    }
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_MESSAGE.to_string(),
                Some(db_err.to_string()),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_MESSAGE.to_string(),
                Some(other.to_string()),
            )
        }
    }
}
