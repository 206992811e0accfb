//! Domain error taxonomy shared by the persistence and HTTP layers.

use crate::types::DbId;

/// Domain-level errors. The HTTP layer maps these to status codes and
/// `{"message": ...}` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A resource does not exist -- or exists but is owned by someone else.
    /// The two cases are deliberately indistinguishable (anti-enumeration).
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// Client-supplied data is missing or malformed. Maps to 400.
    #[error("{0}")]
    Validation(String),

    /// Missing, invalid, or expired credential, or a deactivated account
    /// hitting a protected route. Maps to 401.
    #[error("{0}")]
    Unauthorized(String),

    /// A unique field collided with an existing row. Maps to 400 by
    /// inherited convention, not 409.
    #[error("{0}")]
    Conflict(String),
}

impl CoreError {
    /// Shorthand for a not-found error on an entity addressed by id.
    ///
    /// The id is intentionally not echoed in the message so probing requests
    /// learn nothing beyond "not found".
    pub fn not_found(entity: &'static str, _id: DbId) -> Self {
        CoreError::NotFound { entity }
    }
}

/// Join a list of per-field validation messages into the single aggregated
/// message the API returns (comma-space separated, original order).
pub fn join_validation_errors(errors: Vec<String>) -> CoreError {
    CoreError::Validation(errors.join(", "))
}
