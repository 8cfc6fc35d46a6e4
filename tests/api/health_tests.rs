//! Health and metrics endpoint tests

use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::json;

use crate::common::{body_bytes, dead_backend_url, status_and_json, MockBackend, TestApp};

async fn healthy_backend() -> MockBackend {
    MockBackend::spawn(Router::new().route(
        "/health",
        get(|| async { Json(json!({"status": "ok"})) }),
    ))
    .await
}

#[tokio::test]
async fn test_health_check_returns_ok() {
    let app = TestApp::new(&dead_backend_url().await);

    let (status, body) = status_and_json(app.get("/health").await).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_liveness_ignores_backend() {
    let app = TestApp::new(&dead_backend_url().await);

    let (status, body) = status_and_json(app.get("/health/live").await).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn test_readiness_with_backend_up() {
    let backend = healthy_backend().await;
    let app = TestApp::new(&backend.url());

    let (status, body) = status_and_json(app.get("/health/ready").await).await;

    assert_eq!(status, StatusCode::OK);
    assert_ne!(body["status"], "unhealthy");
    assert!(body["checks"]["backend"]["latency_ms"].is_u64());
}

#[tokio::test]
async fn test_readiness_with_backend_down() {
    let app = TestApp::new(&dead_backend_url().await);

    let (status, body) = status_and_json(app.get("/health/ready").await).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
    assert!(body["checks"]["backend"]["message"].is_string());
}

#[tokio::test]
async fn test_security_headers_on_local_responses() {
    let app = TestApp::new(&dead_backend_url().await);

    let response = app.get("/health").await;

    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["x-frame-options"], "DENY");
}

#[tokio::test]
async fn test_metrics_after_proxied_call() {
    let backend = healthy_backend().await;
    let app = TestApp::new(&backend.url());
    app.get("/health/ready").await;

    let response = app.get("/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);

    let text = String::from_utf8(body_bytes(response).await.to_vec()).unwrap();
    assert!(text.contains("seat_console_proxy_requests_total"));
}
