//! User field constraints and validation.

/// Maximum length of a user's display name.
pub const MAX_NAME_LEN: usize = 50;

/// Minimum password length enforced at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Validate user registration fields, collecting every failure.
///
/// Presence of name/email/password is checked by the handler first (it has
/// its own dedicated message); this covers per-field shape constraints, each
/// failure as its own message so the caller can aggregate them.
pub fn validate_registration_fields(name: &str, email: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if name.chars().count() > MAX_NAME_LEN {
        errors.push(format!("Name cannot exceed {MAX_NAME_LEN} characters"));
    }

    if !is_plausible_email(email) {
        errors.push("Please provide a valid email address".to_string());
    }

    errors
}

/// Minimal email shape check: one `@` with non-empty local and domain parts,
/// and a dot somewhere in the domain. Deliverability is not our problem.
pub fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}
