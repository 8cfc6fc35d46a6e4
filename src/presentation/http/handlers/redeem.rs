//! Public Redeem Handler
//!
//! `POST /api/public/redeem` is handled explicitly rather than through the
//! generic proxy: the body is checked locally, and whatever the backend
//! says comes back as JSON even when its body is not.

use std::time::Instant;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use super::proxy::{ensure_request_id, tag_response, PROXY_SOURCE_HEADER, REQUEST_ID_HEADER};
use crate::application::dto::RedeemRequest;
use crate::infrastructure::metrics;
use crate::shared::error::{AppError, ErrorResponse};
use crate::startup::AppState;

pub const REDEEM_PATH: &str = "/api/public/redeem";

/// Body returned to the caller for an upstream response.
///
/// JSON passes through untouched; anything else is wrapped.
pub fn passthrough_body(status: StatusCode, body: &[u8]) -> Value {
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => value,
        Err(_) => {
            let text = String::from_utf8_lossy(body).trim().to_string();
            let message = if text.is_empty() {
                status.canonical_reason().unwrap_or("Unknown error").to_string()
            } else {
                text
            };
            json!({ "success": status.is_success(), "message": message })
        }
    }
}

pub async fn redeem(State(state): State<AppState>, mut headers: HeaderMap, body: Bytes) -> Response {
    let request_id = ensure_request_id(&mut headers);

    let payload: RedeemRequest = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            let response =
                AppError::BadRequest(format!("Invalid request body: {}", e)).into_response();
            return tag_response(response, &state, &request_id);
        }
    };

    let started = Instant::now();
    let upstream = state
        .http
        .post(state.settings.backend.endpoint(REDEEM_PATH))
        .header(REQUEST_ID_HEADER, request_id.clone())
        .header(PROXY_SOURCE_HEADER, state.source.clone())
        .json(&payload)
        .send()
        .await;

    let result = match upstream {
        Ok(upstream) => {
            let status = upstream.status();
            upstream.bytes().await.map(|bytes| (status, bytes))
        }
        Err(e) => Err(e),
    };

    let response = match result {
        Ok((status, bytes)) => {
            metrics::record_proxied("POST", "redeem", status.as_u16(), started.elapsed().as_secs_f64());
            tracing::info!(status = %status, "Redeem forwarded");
            (status, Json(passthrough_body(status, &bytes))).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, request_id = ?request_id, "Redeem backend unreachable");
            metrics::record_upstream_failure("POST", "redeem", metrics::failure_kind(&e), 503);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new(
                    "backend_unreachable",
                    format!("Unable to reach backend service: {}", e),
                )),
            )
                .into_response()
        }
    };

    tag_response(response, &state, &request_id)
}
