//! Handlers for the `/notes` resource.
//!
//! Every operation passes the authorization gate and scopes its queries to
//! the authenticated owner; a foreign-owned note answers exactly like a
//! nonexistent one.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use prodhub_core::error::{join_validation_errors, CoreError};
use prodhub_core::notes::{normalize_tags, sort_column, validate_note_fields};
use prodhub_core::pagination::{clamp_limit, clamp_page, page_offset, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use prodhub_core::types::DbId;
use prodhub_db::models::note::{CreateNote, Note, UpdateNote};
use prodhub_db::repositories::note_repo::NoteListOptions;
use prodhub_db::repositories::NoteRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ListParams;
use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /api/notes
///
/// List a window of the caller's notes: pagination, optional
/// case-insensitive substring search over title or content, optional sort.
/// Returns a bare array -- no envelope, no total count.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<Note>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
    let page = clamp_page(params.page);

    let opts = NoteListOptions {
        search: params.search_term(),
        sort_column: sort_column(params.sort_by.as_deref()),
        descending: params.descending(),
        limit,
        offset: page_offset(page, limit),
    };

    let notes = NoteRepo::list(&state.pool, auth.user_id, &opts).await?;
    Ok(Json(notes))
}

/// POST /api/notes
///
/// Create a note owned by the caller. Title and content are required and
/// must be non-empty after trimming; tags default to an empty set and are
/// lowercased; the pin flag defaults to false.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateNote>,
) -> AppResult<(StatusCode, Json<Note>)> {
    let title = input.title.as_deref().unwrap_or("").trim();
    let content = input.content.as_deref().unwrap_or("").trim();

    if title.is_empty() || content.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title and content are required".into(),
        )));
    }

    let field_errors = validate_note_fields(title, content);
    if !field_errors.is_empty() {
        return Err(AppError::Core(join_validation_errors(field_errors)));
    }

    let tags = normalize_tags(input.tags.unwrap_or_default());
    let is_pinned = input.is_pinned.unwrap_or(false);

    let note = NoteRepo::create(&state.pool, auth.user_id, title, content, &tags, is_pinned)
        .await?;

    tracing::info!(user_id = auth.user_id, note_id = note.id, "Note created");

    Ok((StatusCode::CREATED, Json(note)))
}

/// PUT /api/notes/:id
///
/// Update a note resolved by id + owner. Title and content are required
/// and non-empty, the same constraint as create; tags and pin state apply
/// only when present in the body. `lastModified` refreshes on save.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateNote>,
) -> AppResult<Json<Note>> {
    let mut note = NoteRepo::find_by_id_and_owner(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Note", id)))?;

    let title = input.title.as_deref().unwrap_or("").trim();
    let content = input.content.as_deref().unwrap_or("").trim();

    if title.is_empty() || content.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title and content are required".into(),
        )));
    }

    let field_errors = validate_note_fields(title, content);
    if !field_errors.is_empty() {
        return Err(AppError::Core(join_validation_errors(field_errors)));
    }

    note.title = title.to_string();
    note.content = content.to_string();
    if let Some(tags) = input.tags {
        note.tags = normalize_tags(tags);
    }
    if let Some(is_pinned) = input.is_pinned {
        note.is_pinned = is_pinned;
    }

    let note = NoteRepo::save(&state.pool, &note)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Note", id)))?;

    tracing::info!(user_id = auth.user_id, note_id = note.id, "Note updated");

    Ok(Json(note))
}

/// DELETE /api/notes/:id
///
/// Atomic find-and-delete scoped to the owner; 404 when nothing matched.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    NoteRepo::delete(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Note", id)))?;

    tracing::info!(user_id = auth.user_id, note_id = id, "Note deleted");

    Ok(Json(MessageResponse {
        message: "Note deleted successfully",
    }))
}
