//! `POST /api/public/redeem` tests

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{dead_backend_url, status_and_json, MockBackend, TestApp};

async fn redeem(State(calls): State<Arc<AtomicUsize>>, Json(body): Json<Value>) -> Response {
    calls.fetch_add(1, Ordering::SeqCst);
    match body["code"].as_str() {
        Some("GOOD-CODE") => Json(json!({
            "success": true,
            "message": "Invite sent",
            "invite_id": 11,
        }))
        .into_response(),
        Some("USED-CODE") => (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "message": "Code already used"})),
        )
            .into_response(),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "database is on fire").into_response(),
    }
}

async fn backend() -> (MockBackend, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route("/api/public/redeem", post(redeem))
        .with_state(calls.clone());
    (MockBackend::spawn(router).await, calls)
}

fn redeem_body(code: &str) -> String {
    json!({"code": code, "email": "member@example.com"}).to_string()
}

#[tokio::test]
async fn test_success_passes_through() {
    let (backend, _) = backend().await;
    let app = TestApp::new(&backend.url());

    let (status, body) =
        status_and_json(app.post_json("/api/public/redeem", &redeem_body("GOOD-CODE")).await).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": true, "message": "Invite sent", "invite_id": 11})
    );
}

#[tokio::test]
async fn test_backend_error_passes_through() {
    let (backend, _) = backend().await;
    let app = TestApp::new(&backend.url());

    let (status, body) =
        status_and_json(app.post_json("/api/public/redeem", &redeem_body("USED-CODE")).await).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"success": false, "message": "Code already used"}));
}

#[tokio::test]
async fn test_text_error_is_wrapped_as_json() {
    let (backend, _) = backend().await;
    let app = TestApp::new(&backend.url());

    let (status, body) =
        status_and_json(app.post_json("/api/public/redeem", &redeem_body("BROKEN")).await).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"success": false, "message": "database is on fire"}));
}

#[tokio::test]
async fn test_invalid_json_is_rejected_locally() {
    let (backend, calls) = backend().await;
    let app = TestApp::new(&backend.url());

    let (status, body) = status_and_json(app.post_json("/api/public/redeem", "{not json").await).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "bad_request");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_field_is_rejected_locally() {
    let (backend, calls) = backend().await;
    let app = TestApp::new(&backend.url());

    let response = app
        .post_json("/api/public/redeem", r#"{"code":"GOOD-CODE"}"#)
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unreachable_backend_returns_503() {
    let app = TestApp::new(&dead_backend_url().await);

    let (status, body) =
        status_and_json(app.post_json("/api/public/redeem", &redeem_body("GOOD-CODE")).await).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "backend_unreachable");
    assert!(body["message"].is_string());
}
