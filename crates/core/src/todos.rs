//! Todo field constraints and validation.

/// Maximum todo text length.
pub const MAX_TEXT_LEN: usize = 500;

/// Maximum category length.
pub const MAX_CATEGORY_LEN: usize = 50;

/// Default priority assigned when the client omits one.
pub const DEFAULT_PRIORITY: &str = "medium";

/// Valid priority values, lowest to highest.
pub const VALID_PRIORITIES: &[&str] = &["low", "medium", "high"];

/// Sort columns a client may request via `sortBy`. Anything else falls back
/// to creation time.
const SORTABLE: &[(&str, &str)] = &[
    ("createdAt", "created_at"),
    ("updatedAt", "updated_at"),
    ("dueDate", "due_date"),
    ("priority", "priority"),
    ("isCompleted", "is_completed"),
    ("text", "text"),
];

/// Map a client-facing `sortBy` value to a whitelisted column name.
pub fn sort_column(sort_by: Option<&str>) -> &'static str {
    sort_by
        .and_then(|s| SORTABLE.iter().find(|(name, _)| *name == s))
        .map(|(_, col)| *col)
        .unwrap_or("created_at")
}

/// Check whether a priority value is one of the allowed levels.
pub fn is_valid_priority(priority: &str) -> bool {
    VALID_PRIORITIES.contains(&priority)
}

/// Validate todo fields against length and enum constraints, collecting
/// every failure. `category` and `priority` are only checked when present.
pub fn validate_todo_fields(
    text: &str,
    priority: Option<&str>,
    category: Option<&str>,
) -> Vec<String> {
    let mut errors = Vec::new();

    if text.chars().count() > MAX_TEXT_LEN {
        errors.push(format!("Task text cannot exceed {MAX_TEXT_LEN} characters"));
    }

    if let Some(p) = priority {
        if !is_valid_priority(p) {
            errors.push("Priority must be one of: low, medium, high".to_string());
        }
    }

    if let Some(c) = category {
        if c.chars().count() > MAX_CATEGORY_LEN {
            errors.push(format!("Category cannot exceed {MAX_CATEGORY_LEN} characters"));
        }
    }

    errors
}
