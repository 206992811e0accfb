//! Domain layer for the Productivity Hub API.
//!
//! Dependency-light on purpose: shared types, the error taxonomy, pagination
//! clamping, and per-resource field validation live here so both the
//! repository layer and the HTTP layer can use them.

pub mod error;
pub mod notes;
pub mod pagination;
pub mod todos;
pub mod types;
pub mod users;
