//! Services and view models against a mock backend

use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use seat_console::application::client::{ApiError, RetryPolicy};
use seat_console::application::services::{
    AdminService, AdminServiceImpl, AuthService, AuthServiceImpl, UserService, UserServiceImpl,
};
use seat_console::application::state::bulk_import::run_import;
use seat_console::application::state::{AuthPhase, ImportAction, ImportPhase, Reducer};
use seat_console::application::view::{page_source_fn, BatchActionsCache, PaginatedQuery};
use seat_console::domain::{InviteRecord, InviteStatus, PageQuery};

use crate::common::MockBackend;

#[derive(Clone, Default)]
struct Backend {
    resend_calls: Arc<AtomicUsize>,
    action_calls: Arc<AtomicUsize>,
    last_query: Arc<parking_lot::Mutex<HashMap<String, String>>>,
}

const TOTAL_INVITES: u64 = 45;

async fn users(
    State(backend): State<Backend>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let page: u64 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let page_size: u64 = params.get("page_size").and_then(|p| p.parse().ok()).unwrap_or(20);
    *backend.last_query.lock() = params;

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(TOTAL_INVITES);
    let items: Vec<Value> = (start..end)
        .map(|i| {
            json!({
                "id": i + 1,
                "email": format!("user{}@example.com", i + 1),
                "status": if i % 2 == 0 { "sent" } else { "accepted" },
                "created_at": "2026-03-01T10:00:00Z",
                "updated_at": "2026-03-01T10:00:00Z",
            })
        })
        .collect();

    Json(json!({
        "items": items,
        "pagination": {"page": page, "page_size": page_size, "total": TOTAL_INVITES},
    }))
}

/// Fails twice with 503 before succeeding.
async fn resend(State(backend): State<Backend>, Path(id): Path<i64>) -> Response {
    let n = backend.resend_calls.fetch_add(1, Ordering::SeqCst);
    if n < 2 {
        return (StatusCode::SERVICE_UNAVAILABLE, "mail relay busy").into_response();
    }
    Json(json!({"success": true, "message": format!("Invite {} resent", id)})).into_response()
}

async fn supported_actions(State(backend): State<Backend>) -> Json<Value> {
    backend.action_calls.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(30)).await;
    Json(json!({"actions": {"users": ["resend", "cancel"], "codes": ["disable"]}}))
}

async fn import(Json(body): Json<Value>) -> Json<Value> {
    let count = body["items"].as_array().map_or(0, Vec::len);
    Json(json!({"success_count": count, "failed_count": 0, "errors": []}))
}

async fn spawn(backend: Backend) -> MockBackend {
    let router = Router::new()
        .route(
            "/api/admin/csrf-token",
            get(|| async { Json(json!({"csrf_token": "tok"})) }),
        )
        .route(
            "/api/admin/me",
            get(|| async { (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Not authenticated"}))) }),
        )
        .route("/api/admin/users", get(users))
        .route("/api/admin/users/{id}/resend", post(resend))
        .route("/api/admin/batch/supported-actions", get(supported_actions))
        .route("/api/admin/mothers/import", post(import))
        .with_state(backend);
    MockBackend::spawn(router).await
}

fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        attempts: 3,
        per_attempt_timeout: Duration::from_secs(2),
        delay: Duration::from_millis(10),
    }
}

#[tokio::test]
async fn test_paginated_query_matches_backend_metadata() {
    let backend = Backend::default();
    let server = spawn(backend.clone()).await;
    let service: Arc<dyn UserService> = Arc::new(UserServiceImpl::new(server.client()));

    let source = page_source_fn(move |query: PageQuery| {
        let service = service.clone();
        async move { service.list_invites(&query).await }
    });
    let mut table: PaginatedQuery<InviteRecord> = PaginatedQuery::new(Arc::new(source), 20);

    table.load().await.unwrap();
    assert_eq!(table.items().len(), 20);
    assert_eq!(table.total(), TOTAL_INVITES);
    assert_eq!(table.items()[0].status, InviteStatus::Sent);

    table.set_status(Some("sent".into()));
    table.set_page(3);
    table.load().await.unwrap();
    assert_eq!(table.items().len(), 5);
    assert_eq!(table.items()[0].id, 41);

    let sent = backend.last_query.lock().clone();
    assert_eq!(sent.get("page").map(String::as_str), Some("3"));
    assert_eq!(sent.get("status").map(String::as_str), Some("sent"));
}

#[tokio::test]
async fn test_resend_retries_transient_failures() {
    let backend = Backend::default();
    let server = spawn(backend.clone()).await;
    let service = UserServiceImpl::with_retry_policy(server.client(), fast_retry());

    let ack = service.resend_invite(7).await.unwrap();

    assert!(ack.success);
    assert_eq!(ack.message.as_deref(), Some("Invite 7 resent"));
    assert_eq!(backend.resend_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_resend_gives_up_after_last_attempt() {
    let backend = Backend::default();
    let server = spawn(backend.clone()).await;
    let policy = RetryPolicy {
        attempts: 2,
        ..fast_retry()
    };
    let service = UserServiceImpl::with_retry_policy(server.client(), policy);

    let err = service.resend_invite(7).await.unwrap_err();

    assert!(matches!(err, ApiError::Unreachable(_)));
    assert_eq!(backend.resend_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_no_content_invite_actions_count_as_success() {
    let router = Router::new()
        .route(
            "/api/admin/csrf-token",
            get(|| async { Json(json!({"csrf_token": "tok"})) }),
        )
        .route(
            "/api/admin/users/{id}/resend",
            post(|| async { StatusCode::NO_CONTENT }),
        )
        .route(
            "/api/admin/users/{id}/cancel",
            post(|| async { StatusCode::NO_CONTENT }),
        );
    let server = MockBackend::spawn(router).await;
    let service = UserServiceImpl::with_retry_policy(server.client(), fast_retry());

    let resent = service.resend_invite(4).await.unwrap();
    let cancelled = service.cancel_invite(4).await.unwrap();

    assert!(resent.success);
    assert!(cancelled.success);
    assert_eq!(cancelled.message, None);
}

#[tokio::test]
async fn test_session_check_treats_401_as_logged_out() {
    let server = spawn(Backend::default()).await;
    let auth = AuthServiceImpl::new(server.client());

    let session = auth.session().await.unwrap();
    assert!(!session.authenticated);

    let mut phase = AuthPhase::default();
    seat_console::application::state::auth::check_session(&auth, &mut phase).await;
    assert_eq!(phase, AuthPhase::Unauthenticated { reason: None });
}

#[tokio::test]
async fn test_batch_actions_cache_coalesces_requests() {
    let backend = Backend::default();
    let server = spawn(backend.clone()).await;
    let admin: Arc<dyn AdminService> = Arc::new(AdminServiceImpl::new(server.client()));
    let cache = BatchActionsCache::from_service(admin);

    let (a, b) = tokio::join!(cache.get(), cache.get());
    let (a, b) = (a.unwrap(), b.unwrap());
    assert!(Arc::ptr_eq(&a, &b));
    assert!(a.supports("users", "cancel"));
    assert!(!a.supports("codes", "resend"));

    cache.get().await.unwrap();
    assert_eq!(backend.action_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_bulk_import_sends_only_valid_rows() {
    let server = spawn(Backend::default()).await;
    let admin = AdminServiceImpl::new(server.client());

    let mut phase = ImportPhase::default();
    phase.reduce(ImportAction::Begin);
    phase.reduce(ImportAction::Loaded(
        "a@example.com,3\nnot-an-email\nb@example.com".into(),
    ));

    let result = run_import(&admin, &mut phase).await.unwrap();

    assert_eq!(result.success_count, 2);
    assert_eq!(phase.name(), "completed");
}

#[tokio::test]
async fn test_import_already_in_flight_is_not_resubmitted() {
    let server = spawn(Backend::default()).await;
    let admin = AdminServiceImpl::new(server.client());

    let mut phase = ImportPhase::default();
    phase.reduce(ImportAction::Begin);
    phase.reduce(ImportAction::Loaded("a@example.com".into()));
    phase.reduce(ImportAction::Start);

    let err = run_import(&admin, &mut phase).await.unwrap_err();

    assert!(matches!(err, ApiError::Invalid(_)));
    assert_eq!(phase.name(), "importing");
}
