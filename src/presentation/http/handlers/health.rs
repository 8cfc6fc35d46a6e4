//! Health Check Handlers
//!
//! Provides health check endpoints for Kubernetes-style liveness and readiness probes.
//!
//! # Endpoints
//! - `GET /health` - Basic health check
//! - `GET /health/live` - Liveness probe (is the proxy running?)
//! - `GET /health/ready` - Readiness probe (can the backend be reached?)

use std::time::{Duration, Instant};

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::infrastructure::metrics;
use crate::startup::AppState;

/// Server start time for uptime calculation
static SERVER_START: Lazy<Instant> = Lazy::new(Instant::now);
static SERVER_START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Backend probe budget; readiness must answer faster than the probe interval
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Round trips slower than this report as degraded
const DEGRADED_AFTER: Duration = Duration::from_millis(500);

/// Initialize the server start time (call during startup)
pub fn init_server_start() {
    Lazy::force(&SERVER_START);
    Lazy::force(&SERVER_START_TIME);
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub started_at: String,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub backend: ServiceHealth,
}

#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Overall health status
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    pub status: &'static str,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse { status: "alive" })
}

/// Returns 200 while the backend answers, 503 once it does not
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let backend = check_backend(&state).await;

    let response = ReadinessResponse {
        status: backend.status,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: SERVER_START.elapsed().as_secs(),
        started_at: SERVER_START_TIME.to_rfc3339(),
        checks: HealthChecks { backend },
    };

    let status_code = match response.status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response))
}

async fn check_backend(state: &AppState) -> ServiceHealth {
    let start = Instant::now();
    let result = state
        .http
        .get(state.settings.backend.endpoint("/health"))
        .timeout(PROBE_TIMEOUT)
        .send()
        .await;
    let latency = start.elapsed();

    match result {
        Ok(response) => {
            metrics::record_proxied("GET", "health", response.status().as_u16(), latency.as_secs_f64());
            classify(response.status(), latency)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Backend health probe failed");
            ServiceHealth {
                status: HealthStatus::Unhealthy,
                latency_ms: None,
                message: Some(format!("Backend unreachable: {}", e)),
            }
        }
    }
}

/// Health of a backend that answered the probe.
fn classify(status: StatusCode, latency: Duration) -> ServiceHealth {
    let latency_ms = Some(latency.as_millis() as u64);
    if status.is_server_error() {
        return ServiceHealth {
            status: HealthStatus::Unhealthy,
            latency_ms,
            message: Some(format!("Backend health returned {}", status)),
        };
    }

    ServiceHealth {
        status: if latency < DEGRADED_AFTER {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        },
        latency_ms,
        message: None,
    }
}
