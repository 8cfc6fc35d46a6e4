//! Prometheus Metrics Module
//!
//! Provides application-wide metrics collection using Prometheus.
//!
//! # Metrics Collected
//! - Proxied request counts by method and upstream status
//! - Upstream latency histogram
//! - Upstream failures by kind (unreachable, timeout)

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// Proxied request counter by method, route and status code
pub static PROXY_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("proxy_requests_total", "Total number of proxied requests")
            .namespace("seat_console"),
        &["method", "route", "status"],
    )
    .expect("Failed to create PROXY_REQUESTS_TOTAL metric")
});

/// Upstream latency histogram in seconds
pub static UPSTREAM_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    let buckets = vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0];
    HistogramVec::new(
        HistogramOpts::new(
            "upstream_duration_seconds",
            "Backend round-trip latency in seconds",
        )
        .namespace("seat_console")
        .buckets(buckets),
        &["method", "route"],
    )
    .expect("Failed to create UPSTREAM_DURATION_SECONDS metric")
});

/// Upstream failures that never produced a response
pub static UPSTREAM_FAILURES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("upstream_failures_total", "Backend calls that failed without a response")
            .namespace("seat_console"),
        &["route", "kind"], // "unreachable", "timeout"
    )
    .expect("Failed to create UPSTREAM_FAILURES_TOTAL metric")
});

/// Register all metrics with the registry
fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(PROXY_REQUESTS_TOTAL.clone()))
        .expect("Failed to register PROXY_REQUESTS_TOTAL");
    registry
        .register(Box::new(UPSTREAM_DURATION_SECONDS.clone()))
        .expect("Failed to register UPSTREAM_DURATION_SECONDS");
    registry
        .register(Box::new(UPSTREAM_FAILURES_TOTAL.clone()))
        .expect("Failed to register UPSTREAM_FAILURES_TOTAL");
}

/// Collect and encode all metrics as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return String::new();
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Record a proxied exchange that got an upstream response.
///
/// `route` is a fixed label ("proxy", "redeem", "health"), never the raw path.
pub fn record_proxied(method: &str, route: &str, status: u16, duration_secs: f64) {
    PROXY_REQUESTS_TOTAL
        .with_label_values(&[method, route, &status.to_string()])
        .inc();
    UPSTREAM_DURATION_SECONDS
        .with_label_values(&[method, route])
        .observe(duration_secs);
}

/// `kind` label for a transport failure: `timeout` or `unreachable`.
pub fn failure_kind(err: &reqwest::Error) -> &'static str {
    if err.is_timeout() {
        "timeout"
    } else {
        "unreachable"
    }
}

/// Record a proxied exchange that failed before the backend answered.
pub fn record_upstream_failure(method: &str, route: &str, kind: &str, status: u16) {
    UPSTREAM_FAILURES_TOTAL.with_label_values(&[route, kind]).inc();
    PROXY_REQUESTS_TOTAL
        .with_label_values(&[method, route, &status.to_string()])
        .inc();
}
