//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- bearer-token generation and verification.

pub mod jwt;
pub mod password;
