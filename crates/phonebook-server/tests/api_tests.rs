//! API integration tests
//!
//! Drives the full router, middleware included, against the in-memory store.
//!
//! Coverage includes:
//! - Every entry endpoint (GET, POST, PUT, DELETE)
//! - Validation and uniqueness failures
//! - Malformed and unknown identifiers
//! - Root greeting, info page, health and the unknown-endpoint fallback
//! - Unsupported methods on known paths and oversized request bodies

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use phonebook_common::Entry;
use phonebook_server::store::{EntryStore, MemoryStore, SharedStore};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

mod common;

use common::{app_with, delete, get, post_json, put_json, send};

fn seeded() -> SharedStore {
    Arc::new(MemoryStore::with_sample_entries())
}

fn empty() -> SharedStore {
    Arc::new(MemoryStore::new())
}

// ============================================================================
// Listing and Fetching
// ============================================================================

#[tokio::test]
async fn test_list_entries() {
    let app = app_with(seeded());

    let response = get(&app, "/api/entries").await;

    assert_eq!(response.status, StatusCode::OK);
    let entries: Vec<Entry> = serde_json::from_str(&response.body).unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].name, "Bill");
    assert_eq!(entries[0].id, "1");
}

#[tokio::test]
async fn test_list_entries_empty_store() {
    let app = app_with(empty());

    let response = get(&app, "/api/entries").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!([]));
}

#[tokio::test]
async fn test_entries_expose_only_public_fields() {
    let app = app_with(seeded());

    let response = get(&app, "/api/entries/1").await;

    let value = response.json();
    let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["id", "name", "number"]);
}

#[tokio::test]
async fn test_get_missing_entry_is_empty_404() {
    let app = app_with(seeded());

    let response = get(&app, "/api/entries/999999").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_get_malformed_id() {
    let app = app_with(seeded());

    let response = get(&app, "/api/entries/not-an-id").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json(), json!({ "error": "malformatted id" }));
}

// ============================================================================
// Creating
// ============================================================================

#[tokio::test]
async fn test_create_then_list_contains_entry() {
    let app = app_with(seeded());

    let created = post_json(
        &app,
        "/api/entries",
        json!({ "name": "Ada Lovelace", "number": "040-123456" }),
    )
    .await;

    assert_eq!(created.status, StatusCode::OK);
    let entry: Entry = serde_json::from_str(&created.body).unwrap();
    assert_eq!(entry.name, "Ada Lovelace");
    assert_eq!(entry.number, "040-123456");
    assert!(!entry.id.is_empty());

    let listed: Vec<Entry> = serde_json::from_str(&get(&app, "/api/entries").await.body).unwrap();
    assert_eq!(listed.len(), 4);
    assert!(listed.contains(&entry));

    let fetched = get(&app, &format!("/api/entries/{}", entry.id)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Entry>(&fetched.body).unwrap(), entry);
}

#[tokio::test]
async fn test_create_accepts_numeric_number() {
    let app = app_with(empty());

    let created = post_json(&app, "/api/entries", json!({ "name": "Ada", "number": 1234567 })).await;

    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.json()["number"], "1234567");
}

#[tokio::test]
async fn test_create_duplicate_name() {
    let app = app_with(seeded());

    let response = post_json(&app, "/api/entries", json!({ "name": "Bill", "number": "99999" })).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json(), json!({ "error": "name already in phonebook" }));

    let listed = get(&app, "/api/entries").await.json();
    assert_eq!(listed.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_create_duplicate_number() {
    let app = app_with(seeded());

    let response = post_json(&app, "/api/entries", json!({ "name": "William", "number": "12345" })).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json(), json!({ "error": "number already in phonebook" }));
}

#[tokio::test]
async fn test_create_short_name() {
    let app = app_with(empty());

    let response = post_json(&app, "/api/entries", json!({ "name": "Al", "number": "12345" })).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json(),
        json!({ "error": "name 'Al' is shorter than the minimum allowed length (3)" })
    );
}

#[tokio::test]
async fn test_create_short_number() {
    let app = app_with(empty());

    let response = post_json(&app, "/api/entries", json!({ "name": "Ada", "number": "1234" })).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json(),
        json!({ "error": "number '1234' is shorter than the minimum allowed length (5)" })
    );
}

#[tokio::test]
async fn test_create_missing_fields() {
    let app = app_with(empty());

    let response = post_json(&app, "/api/entries", json!({ "number": "12345" })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json(), json!({ "error": "name missing" }));

    let response = post_json(&app, "/api/entries", json!({ "name": "Ada" })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json(), json!({ "error": "number missing" }));

    let response = post_json(&app, "/api/entries", json!({ "name": "   ", "number": "12345" })).await;
    assert_eq!(response.json(), json!({ "error": "name missing" }));
}

#[tokio::test]
async fn test_create_malformed_body() {
    let app = app_with(empty());

    let response = send(&app, "POST", "/api/entries", Some("{ not json")).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.json()["error"].is_string());
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let app = app_with(seeded());

    assert_eq!(delete(&app, "/api/entries/3").await.status, StatusCode::NO_CONTENT);

    let created = post_json(&app, "/api/entries", json!({ "name": "Ada", "number": "55555" })).await;
    assert_eq!(created.json()["id"], "4");
}

// ============================================================================
// Updating
// ============================================================================

#[tokio::test]
async fn test_update_entry() {
    let app = app_with(seeded());

    let response = put_json(
        &app,
        "/api/entries/2",
        json!({ "name": "Harriet", "number": "040-999999" }),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json(),
        json!({ "id": "2", "name": "Harriet", "number": "040-999999" })
    );

    let fetched = get(&app, "/api/entries/2").await.json();
    assert_eq!(fetched["number"], "040-999999");
}

#[tokio::test]
async fn test_update_missing_entry() {
    let app = app_with(seeded());

    let response = put_json(&app, "/api/entries/999999", json!({ "name": "Nobody", "number": "00000" })).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_update_validates_fields() {
    let app = app_with(seeded());

    let response = put_json(&app, "/api/entries/1", json!({ "name": "Bi", "number": "12345" })).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(get(&app, "/api/entries/1").await.json()["name"], "Bill");
}

#[tokio::test]
async fn test_update_cannot_take_another_entrys_number() {
    let app = app_with(seeded());

    let response = put_json(&app, "/api/entries/1", json!({ "name": "Bill", "number": "345467" })).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json(), json!({ "error": "number already in phonebook" }));
}

#[tokio::test]
async fn test_update_malformed_id() {
    let app = app_with(seeded());

    let response = put_json(&app, "/api/entries/abc", json!({ "name": "Bill", "number": "12345" })).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json(), json!({ "error": "malformatted id" }));
}

// ============================================================================
// Deleting
// ============================================================================

#[tokio::test]
async fn test_delete_entry() {
    let app = app_with(seeded());

    let response = delete(&app, "/api/entries/1").await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(response.body.is_empty());
    assert_eq!(get(&app, "/api/entries/1").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_entry_still_succeeds() {
    let app = app_with(seeded());

    assert_eq!(delete(&app, "/api/entries/999999").await.status, StatusCode::NO_CONTENT);
    assert_eq!(delete(&app, "/api/entries/1").await.status, StatusCode::NO_CONTENT);
    assert_eq!(delete(&app, "/api/entries/1").await.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_delete_malformed_id() {
    let app = app_with(seeded());

    let response = delete(&app, "/api/entries/abc").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json(), json!({ "error": "malformatted id" }));
}

// ============================================================================
// Other Routes
// ============================================================================

#[tokio::test]
async fn test_root_greeting() {
    let app = app_with(empty());

    let response = get(&app, "/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "<h1>Hello world!</h1>");
    assert!(response.content_type.unwrap().starts_with("text/html"));
}

#[tokio::test]
async fn test_info_page() {
    let app = app_with(seeded());

    let response = get(&app, "/info").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.content_type.unwrap().starts_with("text/html"));
    assert!(response.body.contains("Phonebook has info for 3 people"));
    assert!(response.body.contains("GMT"));
}

#[tokio::test]
async fn test_unknown_endpoint() {
    let app = app_with(empty());

    for uri in ["/api/unknown", "/api/entries/1/extra", "/nothing/here"] {
        let response = get(&app, uri).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(response.json(), json!({ "error": "unknown endpoint" }));
    }
}

#[tokio::test]
async fn test_unsupported_method_on_known_path() {
    let store = seeded();
    let app = app_with(store.clone());

    let cases = [
        ("PATCH", "/api/entries/1"),
        ("POST", "/api/entries/1"),
        ("DELETE", "/api/entries"),
        ("PUT", "/api/entries"),
        ("POST", "/"),
        ("POST", "/info"),
        ("DELETE", "/health"),
    ];
    for (method, uri) in cases {
        let response = send(&app, method, uri, Some(r#"{"name":"Ada","number":"12345"}"#)).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{method} {uri}");
        assert_eq!(
            response.json(),
            json!({ "error": "unknown endpoint" }),
            "{method} {uri}"
        );
    }

    assert_eq!(store.count().await.unwrap(), 3);
    let bill = get(&app, "/api/entries/1").await;
    assert_eq!(bill.json()["name"], "Bill");
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let store = empty();
    let app = app_with(store.clone());

    let payload = json!({ "name": "A".repeat(200 * 1024), "number": "12345" });
    let response = post_json(&app, "/api/entries", payload).await;

    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.json(), json!({ "error": "request entity too large" }));
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_health() {
    let app = app_with(empty());

    let response = get(&app, "/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json(),
        json!({ "status": "healthy", "store": "connected", "backend": "memory" })
    );
}

#[tokio::test]
async fn test_cors_allows_any_origin_by_default() {
    let app = app_with(empty());

    let request = Request::builder()
        .uri("/api/entries")
        .header("origin", "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
