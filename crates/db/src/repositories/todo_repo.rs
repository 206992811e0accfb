//! Repository for the `todos` table.
//!
//! Same ownership discipline as notes: id + user_id on every targeted query.

use prodhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::todo::Todo;
use crate::repositories::like_pattern;

/// Column list for todos queries.
const COLUMNS: &str = "id, user_id, text, is_completed, priority, due_date, \
    completed_at, category, created_at, updated_at";

/// Windowing, filter, and ordering options for todo listing.
///
/// `sort_column` must come from the whitelist in `prodhub_core::todos`.
#[derive(Debug)]
pub struct TodoListOptions<'a> {
    pub completed: Option<bool>,
    pub search: Option<&'a str>,
    pub sort_column: &'static str,
    pub descending: bool,
    pub limit: i64,
    pub offset: i64,
}

/// Owner-scoped CRUD operations for todos.
pub struct TodoRepo;

impl TodoRepo {
    /// Insert a new todo owned by `user_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        text: &str,
        priority: &str,
        due_date: Option<prodhub_core::types::Timestamp>,
        category: Option<&str>,
    ) -> Result<Todo, sqlx::Error> {
        let query = format!(
            "INSERT INTO todos (user_id, text, priority, due_date, category)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(user_id)
            .bind(text)
            .bind(priority)
            .bind(due_date)
            .bind(category)
            .fetch_one(pool)
            .await
    }

    /// Find a todo by id, scoped to its owner.
    pub async fn find_by_id_and_owner(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Todo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM todos WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a window of the owner's todos, optionally filtered by completion
    /// status and by a case-insensitive substring over the task text.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        opts: &TodoListOptions<'_>,
    ) -> Result<Vec<Todo>, sqlx::Error> {
        let direction = if opts.descending { "DESC" } else { "ASC" };
        let sort = opts.sort_column;

        let mut conditions = vec!["user_id = $1".to_string()];
        let mut next_bind = 2;

        if opts.completed.is_some() {
            conditions.push(format!("is_completed = ${next_bind}"));
            next_bind += 1;
        }
        if opts.search.is_some() {
            conditions.push(format!("text ILIKE ${next_bind}"));
            next_bind += 1;
        }

        let where_clause = conditions.join(" AND ");
        let query = format!(
            "SELECT {COLUMNS} FROM todos
             WHERE {where_clause}
             ORDER BY {sort} {direction}
             LIMIT ${next_bind} OFFSET ${}",
            next_bind + 1
        );

        let mut q = sqlx::query_as::<_, Todo>(&query).bind(user_id);
        if let Some(completed) = opts.completed {
            q = q.bind(completed);
        }
        if let Some(search) = opts.search {
            q = q.bind(like_pattern(search));
        }
        q.bind(opts.limit).bind(opts.offset).fetch_all(pool).await
    }

    /// Persist an already-mutated todo (including `completed_at`, which the
    /// handler manages). Scoped to the owner; returns `None` if the row
    /// vanished between fetch and save.
    pub async fn save(pool: &PgPool, todo: &Todo) -> Result<Option<Todo>, sqlx::Error> {
        let query = format!(
            "UPDATE todos SET
                text = $3,
                is_completed = $4,
                priority = $5,
                due_date = $6,
                completed_at = $7,
                category = $8,
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(todo.id)
            .bind(todo.user_id)
            .bind(&todo.text)
            .bind(todo.is_completed)
            .bind(&todo.priority)
            .bind(todo.due_date)
            .bind(todo.completed_at)
            .bind(&todo.category)
            .fetch_optional(pool)
            .await
    }

    /// Atomic find-and-delete scoped to the owner. Returns the deleted
    /// todo's id, or `None` when nothing matched.
    pub async fn delete(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let row: Option<(DbId,)> =
            sqlx::query_as("DELETE FROM todos WHERE id = $1 AND user_id = $2 RETURNING id")
                .bind(id)
                .bind(user_id)
                .fetch_optional(pool)
                .await?;
        Ok(row.map(|(id,)| id))
    }

    /// Count the owner's todos. Used by tests to verify deletes leave the
    /// store unchanged.
    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM todos WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
