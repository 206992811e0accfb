//! Shared query parameter types for list endpoints.

use serde::Deserialize;

/// Listing parameters common to notes and todos
/// (`?page=&limit=&search=&sortBy=&sortOrder=`).
///
/// `page`/`limit` are clamped via `prodhub_core::pagination`; `sortBy` is
/// mapped through a per-resource column whitelist. An unknown `sortOrder`
/// falls back to descending.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl ListParams {
    /// True unless the client explicitly asked for ascending order.
    pub fn descending(&self) -> bool {
        self.sort_order.as_deref() != Some("asc")
    }

    /// The search term, if present and non-blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descending_is_the_default() {
        assert!(ListParams::default().descending());
        let params = ListParams {
            sort_order: Some("desc".into()),
            ..Default::default()
        };
        assert!(params.descending());
    }

    #[test]
    fn asc_flips_order() {
        let params = ListParams {
            sort_order: Some("asc".into()),
            ..Default::default()
        };
        assert!(!params.descending());
    }

    #[test]
    fn blank_search_is_ignored() {
        let params = ListParams {
            search: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(params.search_term(), None);
    }
}
