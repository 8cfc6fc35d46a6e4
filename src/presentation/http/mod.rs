//! HTTP surface: the `/api` proxy, the redeem route, health and metrics.

pub mod handlers;
pub mod routes;
