//! Shared response types for API handlers.

use serde::Serialize;

/// Standard `{"message": ...}` body used for delete confirmations and other
/// resource-free successes. Error responses share the same shape via
/// `AppError`.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
