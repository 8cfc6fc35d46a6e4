//! Generic API Proxy
//!
//! Forwards every `/api/*` request to the backend and streams the answer
//! back. The proxy owns no business logic; it only scrubs hop-by-hop
//! headers, tags the exchange and turns transport failures into the JSON
//! error envelope.

use std::time::Instant;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderMap, HeaderName, HeaderValue, Method, Uri},
    response::{IntoResponse, Response},
};
use futures::StreamExt;

use crate::infrastructure::metrics;
use crate::shared::error::AppError;
use crate::startup::AppState;

pub const PROXY_SOURCE_HEADER: HeaderName = HeaderName::from_static("x-proxy-source");
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Request headers never forwarded upstream.
const REQUEST_SKIP: [&str; 9] = [
    "host",
    "connection",
    "keep-alive",
    "proxy-connection",
    "te",
    "trailer",
    "upgrade",
    "transfer-encoding",
    // Recomputed from the buffered body
    "content-length",
];

/// Response headers never passed back to the caller.
const RESPONSE_SKIP: [&str; 2] = ["connection", "transfer-encoding"];

fn scrub(headers: &HeaderMap, skip: &[&str]) -> HeaderMap {
    headers
        .iter()
        .filter(|(name, _)| !skip.contains(&name.as_str()))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// Headers to send upstream: hop-by-hop removed, everything else verbatim.
pub fn forward_request_headers(headers: &HeaderMap) -> HeaderMap {
    scrub(headers, &REQUEST_SKIP)
}

/// Headers to return to the caller.
pub fn forward_response_headers(headers: &HeaderMap) -> HeaderMap {
    scrub(headers, &RESPONSE_SKIP)
}

/// Existing `x-request-id`, or a fresh uuid v4.
pub fn ensure_request_id(headers: &mut HeaderMap) -> HeaderValue {
    if let Some(id) = headers.get(&REQUEST_ID_HEADER) {
        return id.clone();
    }
    let id = HeaderValue::from_str(&uuid::Uuid::new_v4().to_string())
        .unwrap_or_else(|_| HeaderValue::from_static("unknown"));
    headers.insert(REQUEST_ID_HEADER, id.clone());
    id
}

/// Stamp the proxy headers onto any response leaving this service.
pub fn tag_response(mut response: Response, state: &AppState, request_id: &HeaderValue) -> Response {
    let headers = response.headers_mut();
    headers.insert(PROXY_SOURCE_HEADER, state.source.clone());
    headers
        .entry(REQUEST_ID_HEADER)
        .or_insert_with(|| request_id.clone());
    response
}

/// Target URL on the backend for an incoming URI.
pub fn upstream_url(state: &AppState, uri: &Uri) -> String {
    let mut url = state.settings.backend.endpoint(uri.path());
    if let Some(query) = uri.query() {
        url.push('?');
        url.push_str(query);
    }
    url
}

/// `ANY /api/{*path}`
pub async fn proxy(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Body,
) -> Response {
    let mut forwarded = forward_request_headers(&headers);
    let request_id = ensure_request_id(&mut forwarded);
    forwarded.insert(PROXY_SOURCE_HEADER, state.source.clone());

    let response = match forward(&state, &method, &uri, forwarded, body, &request_id).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    };
    tag_response(response, &state, &request_id)
}

/// Buffer the request body, failing once it grows past `limit`.
pub async fn read_body(body: Body, limit: usize) -> Result<Bytes, AppError> {
    let mut stream = body.into_data_stream();
    let mut buf = Vec::new();
    while let Some(chunk) = stream.next().await {
        let chunk =
            chunk.map_err(|e| AppError::BadRequest(format!("Failed to read request body: {}", e)))?;
        if buf.len() + chunk.len() > limit {
            return Err(AppError::PayloadTooLarge(format!(
                "Request body exceeds {} bytes",
                limit
            )));
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(Bytes::from(buf))
}

async fn forward(
    state: &AppState,
    method: &Method,
    uri: &Uri,
    headers: HeaderMap,
    body: Body,
    request_id: &HeaderValue,
) -> Result<Response, AppError> {
    let limit = state.settings.proxy.max_body_bytes;
    let declared = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());
    if declared.is_some_and(|len| len > limit) {
        return Err(AppError::PayloadTooLarge(format!(
            "Request body exceeds {} bytes",
            limit
        )));
    }
    let body = read_body(body, limit).await?;

    let url = upstream_url(state, uri);
    let started = Instant::now();

    let upstream = state
        .http
        .request(method.clone(), &url)
        .headers(headers)
        .body(body)
        .send()
        .await;

    let upstream = match upstream {
        Ok(upstream) => upstream,
        Err(e) => {
            let err = AppError::from_upstream(&e);
            let (status, _) = err.status_and_key();
            tracing::warn!(
                method = %method,
                path = %uri.path(),
                request_id = ?request_id,
                error = %e,
                "Upstream request failed"
            );
            metrics::record_upstream_failure(
                method.as_str(),
                "proxy",
                metrics::failure_kind(&e),
                status.as_u16(),
            );
            return Err(err);
        }
    };

    let status = upstream.status();
    metrics::record_proxied(
        method.as_str(),
        "proxy",
        status.as_u16(),
        started.elapsed().as_secs_f64(),
    );
    if status.is_server_error() {
        tracing::warn!(method = %method, path = %uri.path(), status = %status, "Backend returned an error");
    } else {
        tracing::debug!(method = %method, path = %uri.path(), status = %status, "Proxied");
    }

    let headers = forward_response_headers(upstream.headers());
    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}
