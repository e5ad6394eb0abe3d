//! Per-request access logging
//!
//! Each request keeps the caller's non-empty `x-request-id`, or gets a
//! fresh UUID. The id is echoed back in `x-request-id` and logged with method, path, status and latency as one `HTTP_REQUEST` event.

use std::time::Instant;

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::observability::{Logger, Severity};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Middleware for `axum::middleware::from_fn`
pub async fn log_requests(request: Request, next: Next) -> Response {
    let request_id =
        incoming_request_id(&request).unwrap_or_else(|| Uuid::new_v4().to_string());
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let started_at = Instant::now();

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    let status = response.status();
    let severity = if status.is_server_error() {
        Severity::Error
    } else {
        Severity::Info
    };
    let duration = started_at.elapsed().as_millis().to_string();

    Logger::log(
        severity,
        "HTTP_REQUEST",
        &[
            ("duration_ms", duration.as_str()),
            ("method", method.as_str()),
            ("path", path.as_str()),
            ("request_id", request_id.as_str()),
            ("status", status.as_str()),
        ],
    );

    response
}

fn incoming_request_id(request: &Request) -> Option<String> {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}
