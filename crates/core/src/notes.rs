//! Note field constraints, validation, and tag normalization.

/// Maximum note title length.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum note content length.
pub const MAX_CONTENT_LEN: usize = 10_000;

/// Sort columns a client may request via `sortBy`. Anything else falls back
/// to creation time so raw query fragments never reach the SQL layer.
const SORTABLE: &[(&str, &str)] = &[
    ("createdAt", "created_at"),
    ("updatedAt", "updated_at"),
    ("lastModified", "last_modified"),
    ("title", "title"),
    ("isPinned", "is_pinned"),
];

/// Map a client-facing `sortBy` value to a whitelisted column name.
pub fn sort_column(sort_by: Option<&str>) -> &'static str {
    sort_by
        .and_then(|s| SORTABLE.iter().find(|(name, _)| *name == s))
        .map(|(_, col)| *col)
        .unwrap_or("created_at")
}

/// Validate note fields against length limits, collecting every failure.
///
/// Non-emptiness of title/content carries its own dedicated message and is
/// checked by the handler; this covers the per-field length constraints.
pub fn validate_note_fields(title: &str, content: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if title.chars().count() > MAX_TITLE_LEN {
        errors.push(format!("Title cannot exceed {MAX_TITLE_LEN} characters"));
    }

    if content.chars().count() > MAX_CONTENT_LEN {
        errors.push(format!("Content cannot exceed {MAX_CONTENT_LEN} characters"));
    }

    errors
}

/// Normalize a tag set: trim each tag, lowercase it, and drop empties.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}
