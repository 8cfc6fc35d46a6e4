//! CSRF handling in the console client

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use pretty_assertions::assert_eq;
use serde_json::json;

use seat_console::application::dto::MotherInput;
use seat_console::application::services::{
    AdminService, AdminServiceImpl, RedeemService, RedeemServiceImpl,
};

use crate::common::MockBackend;

#[derive(Clone, Default)]
struct Counters {
    token_fetches: Arc<AtomicUsize>,
    mutations: Arc<AtomicUsize>,
    /// Reject this many mutations with a CSRF 403 before accepting
    reject_first: Arc<AtomicUsize>,
}

async fn token(State(c): State<Counters>) -> Json<serde_json::Value> {
    c.token_fetches.fetch_add(1, Ordering::SeqCst);
    Json(json!({"csrf_token": "tok-1"}))
}

async fn missing_token(State(c): State<Counters>) -> Json<serde_json::Value> {
    c.token_fetches.fetch_add(1, Ordering::SeqCst);
    Json(json!({}))
}

async fn disable(State(c): State<Counters>, headers: HeaderMap) -> Response {
    c.mutations.fetch_add(1, Ordering::SeqCst);
    let pending_rejections = c.reject_first.load(Ordering::SeqCst);
    if pending_rejections > 0 {
        c.reject_first.fetch_sub(1, Ordering::SeqCst);
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"detail": "CSRF token invalid"})),
        )
            .into_response();
    }
    match headers.get("x-csrf-token").and_then(|v| v.to_str().ok()) {
        Some("tok-1") => Json(json!({"success": true})).into_response(),
        _ => (
            StatusCode::FORBIDDEN,
            Json(json!({"detail": "CSRF token missing"})),
        )
            .into_response(),
    }
}

async fn create_mother(State(c): State<Counters>) -> Response {
    c.mutations.fetch_add(1, Ordering::SeqCst);
    StatusCode::CREATED.into_response()
}

async fn redeem(State(c): State<Counters>) -> Json<serde_json::Value> {
    c.mutations.fetch_add(1, Ordering::SeqCst);
    Json(json!({"success": true, "message": "Invite sent"}))
}

async fn spawn(counters: Counters, with_token: bool) -> MockBackend {
    let token_route = if with_token { get(token) } else { get(missing_token) };
    let router = Router::new()
        .route("/api/admin/csrf-token", token_route)
        .route("/api/admin/codes/{id}/disable", post(disable))
        .route("/api/admin/mothers", post(create_mother))
        .route("/api/public/redeem", post(redeem))
        .with_state(counters);
    MockBackend::spawn(router).await
}

fn mother() -> MotherInput {
    MotherInput {
        name: "owner@example.com".into(),
        seat_limit: 5,
        group_id: None,
        notes: None,
    }
}

#[tokio::test]
async fn test_missing_token_fails_without_sending_request() {
    let counters = Counters::default();
    let backend = spawn(counters.clone(), false).await;
    let admin = AdminServiceImpl::new(backend.client());

    let err = admin.create_mother(&mother()).await.unwrap_err();

    assert!(err.to_string().contains("CSRF"));
    assert!(err.user_message().contains("CSRF"));
    assert_eq!(counters.mutations.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_token_is_attached_and_cached() {
    let counters = Counters::default();
    let backend = spawn(counters.clone(), true).await;
    let client = backend.client();
    let admin = AdminServiceImpl::new(client.clone());

    admin.disable_code(1).await.unwrap();
    admin.disable_code(2).await.unwrap();

    assert_eq!(counters.token_fetches.load(Ordering::SeqCst), 1);
    assert_eq!(counters.mutations.load(Ordering::SeqCst), 2);
    assert_eq!(client.csrf().cached().await.as_deref(), Some("tok-1"));
}

#[tokio::test]
async fn test_csrf_rejection_clears_cached_token() {
    let counters = Counters::default();
    counters.reject_first.store(1, Ordering::SeqCst);
    let backend = spawn(counters.clone(), true).await;
    let client = backend.client();
    let admin = AdminServiceImpl::new(client.clone());

    let err = admin.disable_code(1).await.unwrap_err();
    assert!(err.is_csrf_rejection());
    assert!(client.csrf().cached().await.is_none());

    admin.disable_code(1).await.unwrap();
    assert_eq!(counters.token_fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_public_redeem_skips_csrf() {
    let counters = Counters::default();
    let backend = spawn(counters.clone(), false).await;
    let redeem_service = RedeemServiceImpl::new(backend.client());

    let response = redeem_service
        .redeem("GOOD-CODE", "member@example.com")
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(counters.token_fetches.load(Ordering::SeqCst), 0);
}
