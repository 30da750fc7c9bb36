//! Request observation middleware.
//!
//! Wraps every route: times the downstream handler, records the latency
//! histogram and request counter, and writes one access log line. The
//! response passes through untouched.
//!
//! Downstream failures reach this layer already mapped to responses
//! (rejections, fallback 404, timeout 408, caught panics 500), so they are
//! observed like any other request. If the request future is dropped before
//! the handler returns, nothing is recorded.

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::http::server::AppState;

pub async fn observe_requests(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;

    let elapsed = Instant::now().saturating_duration_since(start);
    let status = response.status();

    if let Err(e) = state.registry.observe(method.as_str(), &path, elapsed) {
        tracing::warn!(
            method = %method,
            path = %path,
            error = %e,
            "Failed to record request metrics"
        );
    }

    tracing::info!(
        method = %method,
        path = %path,
        status = status.as_u16(),
        latency_ms = elapsed.as_secs_f64() * 1000.0,
        "Request completed"
    );

    response
}
