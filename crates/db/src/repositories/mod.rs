pub mod note_repo;
pub mod todo_repo;
pub mod user_repo;

pub use note_repo::NoteRepo;
pub use todo_repo::TodoRepo;
pub use user_repo::UserRepo;

/// Turn raw user input into a safe ILIKE substring pattern, escaping the
/// wildcard metacharacters so they match literally.
pub(crate) fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
