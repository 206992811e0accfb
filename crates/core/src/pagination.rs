//! Pagination defaults and clamping helpers.
//!
//! List endpoints accept `page`/`limit` query parameters and return a bare
//! array window with no total count. Clamping happens here so the repository
//! layer never sees hostile values.

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Maximum number of items per page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp a user-provided page size to `1..=max`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided page number to at least 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Compute the row offset for a (1-based) page and page size.
///
/// Saturating so an absurdly large page number yields a huge offset and an
/// empty window instead of overflowing.
pub fn page_offset(page: i64, limit: i64) -> i64 {
    page.saturating_sub(1).saturating_mul(limit)
}
