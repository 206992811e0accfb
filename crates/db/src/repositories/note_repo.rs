//! Repository for the `notes` table.
//!
//! Every query that addresses a specific note filters on `user_id` as well
//! as `id`. A note owned by someone else is indistinguishable from a note
//! that does not exist.

use prodhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::note::Note;
use crate::repositories::like_pattern;

/// Column list for notes queries.
const COLUMNS: &str = "id, user_id, title, content, tags, is_pinned, \
    last_modified, created_at, updated_at";

/// Windowing, search, and ordering options for note listing.
///
/// `sort_column` must come from the whitelist in `prodhub_core::notes` --
/// it is interpolated into SQL, never bound.
#[derive(Debug)]
pub struct NoteListOptions<'a> {
    pub search: Option<&'a str>,
    pub sort_column: &'static str,
    pub descending: bool,
    pub limit: i64,
    pub offset: i64,
}

/// Owner-scoped CRUD operations for notes.
pub struct NoteRepo;

impl NoteRepo {
    /// Insert a new note owned by `user_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        title: &str,
        content: &str,
        tags: &[String],
        is_pinned: bool,
    ) -> Result<Note, sqlx::Error> {
        let query = format!(
            "INSERT INTO notes (user_id, title, content, tags, is_pinned)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(user_id)
            .bind(title)
            .bind(content)
            .bind(tags)
            .bind(is_pinned)
            .fetch_one(pool)
            .await
    }

    /// Find a note by id, scoped to its owner.
    pub async fn find_by_id_and_owner(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a window of the owner's notes, optionally filtered by a
    /// case-insensitive substring over title or content.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        opts: &NoteListOptions<'_>,
    ) -> Result<Vec<Note>, sqlx::Error> {
        let direction = if opts.descending { "DESC" } else { "ASC" };
        let sort = opts.sort_column;

        match opts.search {
            Some(search) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM notes
                     WHERE user_id = $1 AND (title ILIKE $2 OR content ILIKE $2)
                     ORDER BY {sort} {direction}
                     LIMIT $3 OFFSET $4"
                );
                sqlx::query_as::<_, Note>(&query)
                    .bind(user_id)
                    .bind(like_pattern(search))
                    .bind(opts.limit)
                    .bind(opts.offset)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM notes
                     WHERE user_id = $1
                     ORDER BY {sort} {direction}
                     LIMIT $2 OFFSET $3"
                );
                sqlx::query_as::<_, Note>(&query)
                    .bind(user_id)
                    .bind(opts.limit)
                    .bind(opts.offset)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Persist an already-mutated note, refreshing `last_modified` and
    /// `updated_at`. Scoped to the owner; returns `None` if the row vanished
    /// between fetch and save.
    pub async fn save(pool: &PgPool, note: &Note) -> Result<Option<Note>, sqlx::Error> {
        let query = format!(
            "UPDATE notes SET
                title = $3,
                content = $4,
                tags = $5,
                is_pinned = $6,
                last_modified = NOW(),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(note.id)
            .bind(note.user_id)
            .bind(&note.title)
            .bind(&note.content)
            .bind(&note.tags)
            .bind(note.is_pinned)
            .fetch_optional(pool)
            .await
    }

    /// Atomic find-and-delete scoped to the owner. Returns the deleted
    /// note's id, or `None` when nothing matched.
    pub async fn delete(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let row: Option<(DbId,)> =
            sqlx::query_as("DELETE FROM notes WHERE id = $1 AND user_id = $2 RETURNING id")
                .bind(id)
                .bind(user_id)
                .fetch_optional(pool)
                .await?;
        Ok(row.map(|(id,)| id))
    }

    /// Count the owner's notes. Used by tests to verify deletes leave the
    /// store unchanged.
    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM notes WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
