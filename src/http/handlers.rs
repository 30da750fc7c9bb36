//! Application route handlers.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::http::server::AppState;
use crate::observability::metrics::EXPOSITION_CONTENT_TYPE;

#[derive(Debug, Serialize)]
pub struct ServiceIdentity {
    pub message: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Greeting {
    pub message: String,
}

/// `GET /` — service name and version.
pub async fn root(State(state): State<AppState>) -> Json<ServiceIdentity> {
    Json(ServiceIdentity {
        message: state.service.name.clone(),
        version: state.service.version.clone(),
    })
}

/// `GET /health` — liveness only; no dependency checks.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}

/// `GET /hello?name=...`
///
/// A repeated `name` resolves to its last occurrence.
pub async fn hello(Query(params): Query<Vec<(String, String)>>) -> Json<Greeting> {
    let name = params
        .iter()
        .rev()
        .find(|(key, _)| key == "name")
        .map(|(_, value)| value.as_str())
        .unwrap_or("World");
    Json(Greeting {
        message: format!("Hello, {}!", name),
    })
}

/// `GET /metrics` — Prometheus text exposition of the registry.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)],
        state.registry.render(),
    )
}
