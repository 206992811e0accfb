pub mod note;
pub mod todo;
pub mod user;
