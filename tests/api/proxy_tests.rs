//! Generic `/api/*` proxy tests

use axum::{
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, Uri},
    routing::get,
    Json, Router,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{body_json, dead_backend_url, status_and_json, test_settings, MockBackend, TestApp};

/// Reflects the request it received.
async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> Json<Value> {
    let headers: serde_json::Map<String, Value> = headers
        .iter()
        .map(|(k, v)| (k.to_string(), json!(v.to_str().unwrap_or_default())))
        .collect();
    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "query": uri.query(),
        "headers": headers,
        "body": body,
    }))
}

async fn backend() -> MockBackend {
    MockBackend::spawn(
        Router::new()
            .route(
                "/api/admin/missing",
                get(|| async {
                    (
                        StatusCode::NOT_FOUND,
                        Json(json!({"detail": "Mother account not found"})),
                    )
                }),
            )
            .fallback(echo),
    )
    .await
}

#[tokio::test]
async fn test_forwards_method_path_and_query() {
    let backend = backend().await;
    let app = TestApp::new(&backend.url());

    let (status, echoed) = status_and_json(app.get("/api/admin/users?page=2&status=sent").await).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(echoed["method"], "GET");
    assert_eq!(echoed["path"], "/api/admin/users");
    assert_eq!(echoed["query"], "page=2&status=sent");
}

#[tokio::test]
async fn test_forwards_body_and_session_headers() {
    let backend = backend().await;
    let app = TestApp::new(&backend.url());

    let request = Request::builder()
        .method("PUT")
        .uri("/api/admin/mothers/4")
        .header("host", "console.local")
        .header("cookie", "session=abc")
        .header("x-csrf-token", "tok-1")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"name":"owner@example.com","seat_limit":5}"#))
        .unwrap();
    let echoed = body_json(app.request(request).await).await;

    assert_eq!(echoed["method"], "PUT");
    assert_eq!(echoed["body"], r#"{"name":"owner@example.com","seat_limit":5}"#);
    let headers = &echoed["headers"];
    assert_eq!(headers["cookie"], "session=abc");
    assert_eq!(headers["x-csrf-token"], "tok-1");
    assert_eq!(headers["x-proxy-source"], "seat-console");
    assert_eq!(headers["host"], backend.addr.to_string());
    assert!(headers["x-request-id"].is_string());
}

#[tokio::test]
async fn test_response_is_tagged() {
    let backend = backend().await;
    let app = TestApp::new(&backend.url());

    let request = Request::builder()
        .uri("/api/admin/stats")
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();
    let response = app.request(request).await;

    assert_eq!(response.headers()["x-proxy-source"], "seat-console");
    assert_eq!(response.headers()["x-request-id"], "req-42");
    let echoed = body_json(response).await;
    assert_eq!(echoed["headers"]["x-request-id"], "req-42");
}

#[tokio::test]
async fn test_backend_error_status_passes_through() {
    let backend = backend().await;
    let app = TestApp::new(&backend.url());

    let (status, body) = status_and_json(app.get("/api/admin/missing").await).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Mother account not found"}));
}

#[tokio::test]
async fn test_dead_backend_returns_502_envelope() {
    let app = TestApp::new(&dead_backend_url().await);

    let response = app.get("/api/admin/stats").await;
    assert_eq!(response.headers()["x-proxy-source"], "seat-console");
    let (status, body) = status_and_json(response).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "backend_unreachable");
    assert!(body["message"].as_str().unwrap().contains("Unable to reach backend"));

    let metrics = seat_console::infrastructure::metrics::gather_metrics();
    assert!(metrics.contains(r#"seat_console_upstream_failures_total{kind="unreachable",route="proxy"}"#));
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let backend = backend().await;
    let mut settings = test_settings(&backend.url());
    settings.proxy.max_body_bytes = 16;
    let app = TestApp::with_settings(settings);

    let response = app
        .post_json("/api/admin/mothers/import", &"x".repeat(64))
        .await;
    let (status, body) = status_and_json(response).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"], "payload_too_large");
}
