//! Handlers for the `/todos` resource.
//!
//! Same ownership discipline as notes. Updates use a per-field descriptor:
//! an absent key leaves the stored value alone, an explicit null clears a
//! nullable field.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use prodhub_core::error::{join_validation_errors, CoreError};
use prodhub_core::pagination::{clamp_limit, clamp_page, page_offset, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use prodhub_core::todos::{sort_column, validate_todo_fields, DEFAULT_PRIORITY};
use prodhub_core::types::DbId;
use prodhub_db::models::todo::{CreateTodo, Todo, UpdateTodo};
use prodhub_db::repositories::todo_repo::TodoListOptions;
use prodhub_db::repositories::TodoRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ListParams;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Completion-status filter (`?completed=true|false`), specific to todos.
#[derive(Debug, Deserialize)]
pub struct CompletedFilter {
    pub completed: Option<bool>,
}

/// GET /api/todos
///
/// List a window of the caller's todos with the shared pagination/search/
/// sort parameters plus an optional completion-status filter. Returns a
/// bare array.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filter): Query<CompletedFilter>,
) -> AppResult<Json<Vec<Todo>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
    let page = clamp_page(params.page);

    let opts = TodoListOptions {
        completed: filter.completed,
        search: params.search_term(),
        sort_column: sort_column(params.sort_by.as_deref()),
        descending: params.descending(),
        limit,
        offset: page_offset(page, limit),
    };

    let todos = TodoRepo::list(&state.pool, auth.user_id, &opts).await?;
    Ok(Json(todos))
}

/// POST /api/todos
///
/// Create a todo owned by the caller. Only `text` is required; priority
/// defaults to medium, due date and category to null.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTodo>,
) -> AppResult<(StatusCode, Json<Todo>)> {
    let text = input.text.as_deref().unwrap_or("").trim();

    if text.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Task text is required".into(),
        )));
    }

    let priority = input.priority.as_deref().unwrap_or(DEFAULT_PRIORITY);
    let category = input
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let field_errors = validate_todo_fields(text, Some(priority), category);
    if !field_errors.is_empty() {
        return Err(AppError::Core(join_validation_errors(field_errors)));
    }

    let todo = TodoRepo::create(
        &state.pool,
        auth.user_id,
        text,
        priority,
        input.due_date,
        category,
    )
    .await?;

    tracing::info!(user_id = auth.user_id, todo_id = todo.id, "Todo created");

    Ok((StatusCode::CREATED, Json(todo)))
}

/// PUT /api/todos/:id
///
/// Update a todo resolved by id + owner. Every field is optional-if-
/// present. Completion transitions manage `completedAt`: false→true stamps
/// it, true→false clears it, and re-asserting the current state is a no-op.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTodo>,
) -> AppResult<Json<Todo>> {
    let mut todo = TodoRepo::find_by_id_and_owner(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Todo", id)))?;

    if let Some(ref text) = input.text {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Task text is required".into(),
            )));
        }
        todo.text = text.to_string();
    }

    let new_category = input
        .category
        .as_ref()
        .map(|c| c.as_deref().map(str::trim).filter(|c| !c.is_empty()));

    let field_errors = validate_todo_fields(
        &todo.text,
        input.priority.as_deref(),
        new_category.flatten(),
    );
    if !field_errors.is_empty() {
        return Err(AppError::Core(join_validation_errors(field_errors)));
    }

    if let Some(completed) = input.is_completed {
        // Only a real transition touches completedAt.
        if completed != todo.is_completed {
            todo.is_completed = completed;
            todo.completed_at = completed.then(Utc::now);
        }
    }
    if let Some(priority) = input.priority {
        todo.priority = priority;
    }
    if let Some(due_date) = input.due_date {
        todo.due_date = due_date;
    }
    if let Some(category) = new_category {
        todo.category = category.map(str::to_string);
    }

    let todo = TodoRepo::save(&state.pool, &todo)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Todo", id)))?;

    tracing::info!(user_id = auth.user_id, todo_id = todo.id, "Todo updated");

    Ok(Json(todo))
}

/// DELETE /api/todos/:id
///
/// Atomic find-and-delete scoped to the owner; 404 when nothing matched.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    TodoRepo::delete(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Todo", id)))?;

    tracing::info!(user_id = auth.user_id, todo_id = id, "Todo deleted");

    Ok(Json(MessageResponse {
        message: "Todo deleted successfully",
    }))
}
