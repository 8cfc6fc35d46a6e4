//! Route Configuration
//!
//! Configures all HTTP routes for the proxy.

use axum::{
    response::IntoResponse,
    routing::{any, get, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::create_security_headers_layer;
use crate::startup::AppState;

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    let security = create_security_headers_layer(&state.settings.environment);

    Router::new()
        // Explicit redeem route wins over the catch-all
        .route(handlers::redeem::REDEEM_PATH, post(handlers::redeem::redeem))
        .route("/api/{*path}", any(handlers::proxy::proxy))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .layer(security)
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}
