//! Infrastructure Layer
//!
//! Contains implementations for external concerns:
//! - Upstream HTTP client for the backend service
//! - Prometheus metrics

pub mod metrics;
pub mod upstream;
