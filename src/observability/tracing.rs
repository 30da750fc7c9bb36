//! Distributed tracing support.
//!
//! # Responsibilities
//! - Extract W3C trace context from incoming requests
//! - Create one `http_request` span per request for the trace layer
//!
//! # Design Decisions
//! - Malformed `traceparent` headers are ignored, never rejected
//! - Span fields are the same keys the access log uses (method, path)

use axum::body::Body;
use axum::http::{HeaderMap, Request};
use ::tracing::Span;

use crate::http::request::X_REQUEST_ID;

/// Name of the W3C trace context header.
pub const TRACEPARENT: &str = "traceparent";

/// Parsed W3C `traceparent` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// 32 lowercase hex characters.
    pub trace_id: String,
    /// 16 lowercase hex characters.
    pub parent_id: String,
    pub sampled: bool,
}

impl TraceContext {
    /// Parse a `traceparent` value: `{version}-{trace_id}-{parent_id}-{flags}`.
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.trim().split('-');
        let version = parts.next()?;
        let trace_id = parts.next()?;
        let parent_id = parts.next()?;
        let flags = parts.next()?;

        if !is_hex(version, 2) || version == "ff" {
            return None;
        }
        // version 00 has exactly four fields; later versions may append more
        if version == "00" && parts.next().is_some() {
            return None;
        }
        if !is_hex(trace_id, 32) || is_zero(trace_id) {
            return None;
        }
        if !is_hex(parent_id, 16) || is_zero(parent_id) {
            return None;
        }
        if !is_hex(flags, 2) {
            return None;
        }
        let flags = u8::from_str_radix(flags, 16).ok()?;

        Some(Self {
            trace_id: trace_id.to_ascii_lowercase(),
            parent_id: parent_id.to_ascii_lowercase(),
            sampled: flags & 0x01 == 0x01,
        })
    }

    /// Extract the trace context from request headers, if present and valid.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get(TRACEPARENT)
            .and_then(|v| v.to_str().ok())
            .and_then(Self::parse)
    }
}

fn is_hex(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_hexdigit())
}

fn is_zero(s: &str) -> bool {
    s.bytes().all(|b| b == b'0')
}

/// Span factory for `TraceLayer::make_span_with`.
pub fn make_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    let span = ::tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
        trace_id = ::tracing::field::Empty,
        parent_span_id = ::tracing::field::Empty,
    );

    if let Some(ctx) = TraceContext::from_headers(request.headers()) {
        span.record("trace_id", ctx.trace_id.as_str());
        span.record("parent_span_id", ctx.parent_id.as_str());
    }

    span
}
