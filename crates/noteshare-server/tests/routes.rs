use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use noteshare_core::{AccessPolicy, DeletePolicy};
use noteshare_server::{AppState, ServerConfig, middleware, routes::build_router};
use noteshare_store::{AccessControlledNoteStore, MemoryStore};
use serde_json::{Value as JsonValue, json};
use tower::ServiceExt;

fn test_app() -> Router {
    test_app_with_policy(AccessPolicy::default())
}

fn test_app_with_policy(policy: AccessPolicy) -> Router {
    let notes = AccessControlledNoteStore::new(Arc::new(MemoryStore::new())).with_policy(policy);
    build_router(AppState::new(notes, ServerConfig::default()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<JsonValue>) -> (StatusCode, JsonValue) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).expect("valid JSON response")
    };
    (status, json)
}

async fn create(app: &Router, owner: &str, text: &str) -> String {
    let (status, json) = send(
        app,
        "POST",
        "/api/notes",
        Some(json!({ "text": text, "user": { "email": owner } })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json["id"].as_str().expect("note id").to_string()
}

fn error_code(json: &JsonValue) -> Option<&str> {
    json.get("error")
        .and_then(|e| e.get("code"))
        .and_then(|c| c.as_str())
}

#[tokio::test]
async fn health_check_ok() {
    let app = test_app();
    let (status, json) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn create_returns_note_payload() {
    let app = test_app();
    let (status, json) = send(
        &app,
        "POST",
        "/api/notes",
        Some(json!({ "text": "hi", "user": { "email": "a@x" }, "sharedWith": ["b@x", "a@x"] })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["text"], "hi");
    assert_eq!(json["ownerEmail"], "a@x");
    assert_eq!(json["sharedWith"], json!(["b@x"]));
    assert!(json["createdAt"].is_string());
    assert!(json["id"].is_string());
}

#[tokio::test]
async fn create_without_user_is_bad_request() {
    let app = test_app();
    let (status, json) = send(&app, "POST", "/api/notes", Some(json!({ "text": "hi" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&json), Some("BAD_REQUEST"));
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/notes")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = app.oneshot(request).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_requires_email() {
    let app = test_app();
    let (status, _) = send(&app, "GET", "/api/notes", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_list_query_uses_error_envelope() {
    let app = test_app();
    let (status, json) = send(&app, "GET", "/api/notes?email=a@x&email=b@x", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&json), Some("BAD_REQUEST"));
    assert!(json["error"]["message"].is_string());
}

#[tokio::test]
async fn list_shows_owned_and_shared_notes_only() {
    let app = test_app();
    let mine = create(&app, "a@x", "mine").await;
    let theirs = create(&app, "c@x", "theirs").await;

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/notes/{theirs}/share"),
        Some(json!({ "emailToShareWith": "a@x", "requestingUserEmail": "c@x" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    create(&app, "c@x", "private").await;

    let (status, json) = send(&app, "GET", "/api/notes?email=a@x", None).await;
    assert_eq!(status, StatusCode::OK);
    let mut ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap())
        .collect();
    ids.sort_unstable();
    let mut expected = vec![mine.as_str(), theirs.as_str()];
    expected.sort_unstable();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn sharing_flow_over_http() {
    let app = test_app();
    let id = create(&app, "a@x", "hi").await;

    let (status, json) = send(
        &app,
        "PUT",
        &format!("/api/notes/{id}/share"),
        Some(json!({ "emailToShareWith": "b@x", "requestingUserEmail": "a@x" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Note shared with b@x");

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/notes/{id}"),
        Some(json!({ "text": "hi2", "requestingUserEmail": "b@x" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, listed) = send(&app, "GET", "/api/notes?email=b@x", None).await;
    assert_eq!(listed[0]["text"], "hi2");
    assert_eq!(listed[0]["ownerEmail"], "a@x");

    let (status, json) = send(
        &app,
        "DELETE",
        &format!("/api/notes/{id}"),
        Some(json!({ "requestingUserEmail": "c@x" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&json), Some("FORBIDDEN"));

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/notes/{id}"),
        Some(json!({ "requestingUserEmail": "b@x" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, listed) = send(&app, "GET", "/api/notes?email=a@x", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn only_owner_may_share() {
    let app = test_app();
    let id = create(&app, "a@x", "hi").await;
    send(
        &app,
        "PUT",
        &format!("/api/notes/{id}/share"),
        Some(json!({ "emailToShareWith": "b@x", "requestingUserEmail": "a@x" })),
    )
    .await;

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/notes/{id}/share"),
        Some(json!({ "emailToShareWith": "c@x", "requestingUserEmail": "b@x" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn share_requires_both_emails() {
    let app = test_app();
    let id = create(&app, "a@x", "hi").await;
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/notes/{id}/share"),
        Some(json!({ "requestingUserEmail": "a@x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn edit_without_requester_is_bad_request() {
    let app = test_app();
    let id = create(&app, "a@x", "hi").await;
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/notes/{id}"),
        Some(json!({ "text": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_and_malformed_ids_are_not_found() {
    let app = test_app();
    for id in [uuid_like(), "not-a-uuid".to_string()] {
        let (status, json) = send(
            &app,
            "PUT",
            &format!("/api/notes/{id}"),
            Some(json!({ "text": "x", "requestingUserEmail": "a@x" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "id {id}");
        assert_eq!(error_code(&json), Some("NOT_FOUND"));
    }
}

#[tokio::test]
async fn owner_only_delete_policy_over_http() {
    let app = test_app_with_policy(AccessPolicy {
        delete: DeletePolicy::OwnerOnly,
    });
    let id = create(&app, "a@x", "hi").await;
    send(
        &app,
        "PUT",
        &format!("/api/notes/{id}/share"),
        Some(json!({ "emailToShareWith": "b@x", "requestingUserEmail": "a@x" })),
    )
    .await;

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/notes/{id}"),
        Some(json!({ "requestingUserEmail": "b@x" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn placeholder_user_endpoint() {
    let app = test_app();
    let (status, json) = send(&app, "GET", "/api/user", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["email"], "dev@example.com");
    assert_eq!(json["name"], "Developer");
}

#[tokio::test]
async fn request_id_is_generated_and_echoed() {
    let config = ServerConfig::default();
    let app = middleware::apply(test_app(), &config).unwrap();

    let resp = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(resp.headers().contains_key("x-request-id"));

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "abc-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.headers()["x-request-id"], "abc-123");
}

fn uuid_like() -> String {
    "00000000-0000-4000-8000-000000000000".to_string()
}
