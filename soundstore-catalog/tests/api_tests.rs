//! Integration tests for soundstore-catalog HTTP endpoints
//!
//! Tests cover:
//! - Health endpoint
//! - Sound create/read/update/delete status codes and bodies
//! - `tag_id` list filter over the query string
//! - Error body shape for 400/404/409/422

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use soundstore_catalog::{build_router, AppState};
use soundstore_common::db::init_memory_database;
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: Create app over a fresh in-memory database
async fn setup_app() -> Router {
    let db = init_memory_database()
        .await
        .expect("Should create in-memory database");
    build_router(AppState::new(db))
}

/// Test helper: Request without body
fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: Request with JSON body
fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Test helper: POST /tags, return the new id
async fn post_tag(app: &Router, label: &str) -> i64 {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/tags", json!({ "label": label })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    extract_json(response.into_body()).await["id"].as_i64().unwrap()
}

/// Test helper: POST /sounds, return the created body
async fn post_sound(app: &Router, title: &str, rank: i64, tags: &[i64]) -> Value {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/sounds",
            json!({
                "title": title,
                "price": 2.5,
                "uploaded_on": "2024-06-01T09:00:00Z",
                "rank": rank,
                "tags": tags,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    extract_json(response.into_body()).await
}

fn titles(list: &Value) -> Vec<&str> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app().await;

    let response = app.oneshot(test_request("GET", "/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = extract_json(response.into_body()).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["module"], "soundstore-catalog");
    assert!(json["version"].is_string());
}

// =============================================================================
// Create / Read
// =============================================================================

#[tokio::test]
async fn test_create_sound_returns_201_with_location() {
    let app = setup_app().await;
    let drums = post_tag(&app, "drums").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/sounds",
            json!({ "title": "Kick Drum", "price": 1.5, "tags": [drums] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(header::LOCATION)
        .expect("Should have Location header")
        .to_str()
        .unwrap()
        .to_string();
    let created = extract_json(response.into_body()).await;
    let id = created["id"].as_str().unwrap();
    assert_eq!(location, format!("/sounds/{}", id));
    assert_eq!(created["rank"], 0);
    assert_eq!(created["tags"], json!([{ "id": drums, "label": "drums" }]));

    // Location resolves to the same resource
    let response = app.oneshot(test_request("GET", &location)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = extract_json(response.into_body()).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_sound_with_unknown_tag_is_404() {
    let app = setup_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/sounds",
            json!({ "title": "Kick", "price": 1.0, "tags": [42] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = extract_json(response.into_body()).await;
    assert_eq!(json["error"]["code"], "NOT_FOUND");

    let response = app.oneshot(test_request("GET", "/sounds")).await.unwrap();
    assert_eq!(extract_json(response.into_body()).await, json!([]));
}

#[tokio::test]
async fn test_create_sound_blank_title_is_422() {
    let app = setup_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/sounds",
            json!({ "title": "   ", "price": 1.0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = extract_json(response.into_body()).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_get_missing_sound_is_404() {
    let app = setup_app().await;

    let response = app
        .oneshot(test_request(
            "GET",
            "/sounds/6f1c2a3e-8d4b-4c5a-9e7f-0a1b2c3d4e5f",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = extract_json(response.into_body()).await;
    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert!(json["error"]["message"].is_string());
}

// =============================================================================
// List filter
// =============================================================================

#[tokio::test]
async fn test_list_sounds_filters_by_all_tags() {
    let app = setup_app().await;
    let a = post_tag(&app, "A").await;
    let b = post_tag(&app, "B").await;
    post_sound(&app, "Kick Drum", 10, &[a, b]).await;
    post_sound(&app, "Snare", 5, &[a]).await;

    let cases = [
        (format!("/sounds?tag_id={}", a), vec!["Kick Drum", "Snare"]),
        (format!("/sounds?tag_id={}&tag_id={}", a, b), vec!["Kick Drum"]),
        (format!("/sounds?tag_id={}&tag_id={}&tag_id=999", a, b), vec!["Kick Drum"]),
        ("/sounds".to_string(), vec!["Kick Drum", "Snare"]),
    ];

    for (uri, expected) in cases {
        let response = app.clone().oneshot(test_request("GET", &uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        let list = extract_json(response.into_body()).await;
        assert_eq!(titles(&list), expected, "{}", uri);
    }
}

#[tokio::test]
async fn test_list_sounds_renders_tag_labels() {
    let app = setup_app().await;
    let drums = post_tag(&app, "drums").await;
    post_sound(&app, "Kick Drum", 1, &[drums]).await;

    let response = app.oneshot(test_request("GET", "/sounds")).await.unwrap();

    let list = extract_json(response.into_body()).await;
    assert_eq!(list[0]["tags"], json!(["drums"]));
    assert_eq!(list[0]["price"], 2.5);
}

#[tokio::test]
async fn test_list_sounds_non_integer_tag_id_is_422() {
    let app = setup_app().await;

    let response = app
        .oneshot(test_request("GET", "/sounds?tag_id=drums"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// =============================================================================
// Update / Delete
// =============================================================================

#[tokio::test]
async fn test_update_sound_returns_204() {
    let app = setup_app().await;
    let created = post_sound(&app, "Kick Drum", 3, &[]).await;
    let id = created["id"].as_str().unwrap();
    let uri = format!("/sounds/{}", id);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            json!({
                "id": id,
                "title": "Kick Drum v2",
                "price": 3.0,
                "uploaded_on": "2024-07-01T00:00:00Z",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(test_request("GET", &uri)).await.unwrap();
    let fetched = extract_json(response.into_body()).await;
    assert_eq!(fetched["title"], "Kick Drum v2");
    assert_eq!(fetched["price"], 3.0);
    assert_eq!(fetched["rank"], 3);
}

#[tokio::test]
async fn test_update_sound_id_mismatch_is_400() {
    let app = setup_app().await;
    let created = post_sound(&app, "Kick Drum", 3, &[]).await;
    let uri = format!("/sounds/{}", created["id"].as_str().unwrap());

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            json!({
                "id": "6f1c2a3e-8d4b-4c5a-9e7f-0a1b2c3d4e5f",
                "title": "Hijacked",
                "price": 0.0,
                "uploaded_on": "2024-07-01T00:00:00Z",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = extract_json(response.into_body()).await;
    assert_eq!(json["error"]["code"], "BAD_REQUEST");

    let response = app.oneshot(test_request("GET", &uri)).await.unwrap();
    assert_eq!(extract_json(response.into_body()).await, created);
}

#[tokio::test]
async fn test_delete_sound_returns_204_then_404() {
    let app = setup_app().await;
    let created = post_sound(&app, "Kick Drum", 3, &[]).await;
    let uri = format!("/sounds/{}", created["id"].as_str().unwrap());

    let response = app
        .clone()
        .oneshot(test_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(test_request("GET", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(test_request("DELETE", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Tags
// =============================================================================

#[tokio::test]
async fn test_tags_create_list_and_conflict() {
    let app = setup_app().await;
    let drums = post_tag(&app, "drums").await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/tags", json!({ "label": "drums" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = extract_json(response.into_body()).await;
    assert_eq!(json["error"]["code"], "CONFLICT");

    let response = app.oneshot(test_request("GET", "/tags")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let tags = extract_json(response.into_body()).await;
    assert_eq!(tags, json!([{ "id": drums, "label": "drums" }]));
}
