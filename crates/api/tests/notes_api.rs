//! HTTP-level integration tests for the `/notes` resource.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get_auth, post_json_auth, put_json_auth, seed_user,
};
use prodhub_db::repositories::NoteRepo;
use sqlx::PgPool;

/// Create a note over HTTP and return the parsed 201 body.
async fn create_note(
    pool: &PgPool,
    token: &str,
    body: serde_json::Value,
) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/notes", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// A freshly created note comes back with defaults applied and is visible
/// through a subsequent list call.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_and_fetch_round_trip(pool: PgPool) {
    let (user_id, token) = seed_user(&pool, "Ada", "ada@example.com").await;

    let created = create_note(
        &pool,
        &token,
        serde_json::json!({ "title": "Groceries", "content": "milk, eggs" }),
    )
    .await;

    assert_eq!(created["title"], "Groceries");
    assert_eq!(created["content"], "milk, eggs");
    assert_eq!(created["tags"], serde_json::json!([]));
    assert_eq!(created["isPinned"], false);
    assert_eq!(created["user"], user_id);
    assert!(created["createdAt"].is_string());
    assert!(created["lastModified"].is_string());

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/notes", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;

    let listed = listed.as_array().expect("list body must be a bare array");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], created);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_requires_title_and_content(pool: PgPool) {
    let (_user_id, token) = seed_user(&pool, "Ada", "ada@example.com").await;

    for body in [
        serde_json::json!({ "content": "no title" }),
        serde_json::json!({ "title": "no content" }),
        serde_json::json!({ "title": "   ", "content": "blank title" }),
    ] {
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(app, "/api/notes", body, &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Title and content are required");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_enforces_length_limits(pool: PgPool) {
    let (_user_id, token) = seed_user(&pool, "Ada", "ada@example.com").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/notes",
        serde_json::json!({ "title": "t".repeat(201), "content": "fine" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Title cannot exceed 200 characters");
}

/// Tags are trimmed, lowercased, and empties dropped on the way in.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_normalizes_tags(pool: PgPool) {
    let (_user_id, token) = seed_user(&pool, "Ada", "ada@example.com").await;

    let created = create_note(
        &pool,
        &token,
        serde_json::json!({
            "title": "Tagged",
            "content": "body",
            "tags": ["  Work ", "URGENT", "", "   "],
            "isPinned": true
        }),
    )
    .await;

    assert_eq!(created["tags"], serde_json::json!(["work", "urgent"]));
    assert_eq!(created["isPinned"], true);
}

// ---------------------------------------------------------------------------
// List: search, sort, pagination
// ---------------------------------------------------------------------------

/// Substring search is case-insensitive and matches either title or content.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_search_is_case_insensitive(pool: PgPool) {
    let (_user_id, token) = seed_user(&pool, "Ada", "ada@example.com").await;

    create_note(&pool, &token, serde_json::json!({ "title": "Foo Bar", "content": "alpha" })).await;
    create_note(&pool, &token, serde_json::json!({ "title": "Other", "content": "has FOO inside" })).await;
    create_note(&pool, &token, serde_json::json!({ "title": "Unrelated", "content": "beta" })).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/notes?search=foo", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let titles: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles.len(), 2);
    assert!(titles.contains(&"Foo Bar"));
    assert!(titles.contains(&"Other"));
}

/// SQL LIKE metacharacters in the search term match literally.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_search_escapes_like_wildcards(pool: PgPool) {
    let (_user_id, token) = seed_user(&pool, "Ada", "ada@example.com").await;

    create_note(&pool, &token, serde_json::json!({ "title": "100% done", "content": "a" })).await;
    create_note(&pool, &token, serde_json::json!({ "title": "100 grams", "content": "b" })).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/notes?search=100%25", &token).await;
    let json = body_json(response).await;

    let json = json.as_array().unwrap();
    assert_eq!(json.len(), 1);
    assert_eq!(json[0]["title"], "100% done");
}

/// Pagination slices by page and limit; pages past the data are empty.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_pagination_windows(pool: PgPool) {
    let (_user_id, token) = seed_user(&pool, "Ada", "ada@example.com").await;

    for i in 0..3 {
        create_note(
            &pool,
            &token,
            serde_json::json!({ "title": format!("Note {i}"), "content": "x" }),
        )
        .await;
    }

    let app = common::build_test_app(pool.clone());
    let page1 = body_json(get_auth(app, "/api/notes?limit=2&page=1&sortBy=title&sortOrder=asc", &token).await).await;
    let app = common::build_test_app(pool.clone());
    let page2 = body_json(get_auth(app, "/api/notes?limit=2&page=2&sortBy=title&sortOrder=asc", &token).await).await;
    let app = common::build_test_app(pool);
    let page3 = body_json(get_auth(app, "/api/notes?limit=2&page=3&sortBy=title&sortOrder=asc", &token).await).await;

    assert_eq!(page1.as_array().unwrap().len(), 2);
    assert_eq!(page1[0]["title"], "Note 0");
    assert_eq!(page1[1]["title"], "Note 1");
    assert_eq!(page2.as_array().unwrap().len(), 1);
    assert_eq!(page2[0]["title"], "Note 2");
    assert_eq!(page3.as_array().unwrap().len(), 0);
}

/// A page number at the i64 ceiling yields an empty window, not an error.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_huge_page_number_returns_empty_window(pool: PgPool) {
    let (_user_id, token) = seed_user(&pool, "Ada", "ada@example.com").await;
    create_note(&pool, &token, serde_json::json!({ "title": "Only", "content": "x" })).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/notes?page=9223372036854775807&limit=100", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 0);
}

/// An unrecognized sort field silently falls back to createdAt rather than
/// reaching the database.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_sort_field_falls_back(pool: PgPool) {
    let (_user_id, token) = seed_user(&pool, "Ada", "ada@example.com").await;
    create_note(&pool, &token, serde_json::json!({ "title": "Only", "content": "x" })).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/notes?sortBy=password_hash", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Ownership scoping
// ---------------------------------------------------------------------------

/// Another user's notes never appear in a list and cannot be reached by id;
/// a foreign id answers exactly like a missing one.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_cross_user_isolation(pool: PgPool) {
    let (ada_id, ada_token) = seed_user(&pool, "Ada", "ada@example.com").await;
    let (_bob_id, bob_token) = seed_user(&pool, "Bob", "bob@example.com").await;

    let note = create_note(&pool, &ada_token, serde_json::json!({ "title": "Secret", "content": "x" })).await;
    let note_id = note["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let listed = body_json(get_auth(app, "/api/notes", &bob_token).await).await;
    assert_eq!(listed.as_array().unwrap().len(), 0);

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/notes/{note_id}"),
        serde_json::json!({ "title": "Hijacked", "content": "x" }),
        &bob_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Note not found");

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/notes/{note_id}"), &bob_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Note not found");

    // The note is untouched and the owner's count is unchanged.
    let app = common::build_test_app(pool.clone());
    let listed = body_json(get_auth(app, "/api/notes", &ada_token).await).await;
    assert_eq!(listed[0]["title"], "Secret");

    let count = NoteRepo::count_for_user(&pool, ada_id)
        .await
        .expect("count should succeed");
    assert_eq!(count, 1);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// Updates replace title and content, apply tags and pin state only when
/// present, and refresh lastModified.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_applies_fields_and_refreshes_last_modified(pool: PgPool) {
    let (_user_id, token) = seed_user(&pool, "Ada", "ada@example.com").await;
    let created = create_note(
        &pool,
        &token,
        serde_json::json!({ "title": "Before", "content": "old", "tags": ["keep"], "isPinned": true }),
    )
    .await;
    let note_id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/notes/{note_id}"),
        serde_json::json!({ "title": "After", "content": "new" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;

    assert_eq!(updated["title"], "After");
    assert_eq!(updated["content"], "new");
    // Absent fields keep their stored values.
    assert_eq!(updated["tags"], serde_json::json!(["keep"]));
    assert_eq!(updated["isPinned"], true);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_ne!(updated["lastModified"], created["lastModified"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_requires_title_and_content(pool: PgPool) {
    let (_user_id, token) = seed_user(&pool, "Ada", "ada@example.com").await;
    let created = create_note(&pool, &token, serde_json::json!({ "title": "T", "content": "c" })).await;
    let note_id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/notes/{note_id}"),
        serde_json::json!({ "tags": ["only-tags"] }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Title and content are required");
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// Deleting removes exactly the targeted note and answers 404 on a repeat.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_is_scoped_and_single_shot(pool: PgPool) {
    let (user_id, token) = seed_user(&pool, "Ada", "ada@example.com").await;
    let keep = create_note(&pool, &token, serde_json::json!({ "title": "Keep", "content": "x" })).await;
    let doomed = create_note(&pool, &token, serde_json::json!({ "title": "Doomed", "content": "x" })).await;
    let doomed_id = doomed["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/notes/{doomed_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Note deleted successfully");

    let remaining = NoteRepo::count_for_user(&pool, user_id)
        .await
        .expect("count should succeed");
    assert_eq!(remaining, 1);

    let app = common::build_test_app(pool.clone());
    let listed = body_json(get_auth(app, "/api/notes", &token).await).await;
    assert_eq!(listed[0]["id"], keep["id"]);

    let app = common::build_test_app(pool);
    let response = delete_auth(app, &format!("/api/notes/{doomed_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
