//! Request middleware: the authorization gate and auth-endpoint rate
//! limiting.

pub mod auth;
pub mod rate_limit;
