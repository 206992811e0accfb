//! Todo entity model and DTOs.

use prodhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// A row from the `todos` table. Serialized with camelCase field names to
/// match the public API surface.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: DbId,
    #[serde(rename = "user")]
    pub user_id: DbId,
    pub text: String,
    pub is_completed: bool,
    pub priority: String,
    pub due_date: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub category: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a todo. Only `text` is required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub text: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<Timestamp>,
    pub category: Option<String>,
}

/// DTO for updating a todo. Every field is optional-if-present: an absent
/// key leaves the stored value unchanged.
///
/// `due_date` and `category` are nullable, so they need a second `Option`
/// layer to tell "key absent" (outer `None`, no change) apart from
/// "explicit null" (`Some(None)`, clear the value).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodo {
    pub text: Option<String>,
    pub is_completed: Option<bool>,
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub due_date: Option<Option<Timestamp>>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub category: Option<Option<String>>,
}

/// Deserialize a present (possibly null) JSON key into `Some(inner)`.
/// Combined with `#[serde(default)]`, an absent key stays `None`.
fn present_or_null<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
