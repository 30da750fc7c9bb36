//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, observation, timeout, panics)
//! - Bind server to listener
//! - Stop accepting and drain on shutdown

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    catch_panic::CatchPanicLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{ServiceConfig, ServiceInfo};
use crate::http::handlers;
use crate::http::middleware::observe_requests;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::observability::{make_request_span, MetricsError, MetricsRegistry};

/// Errors raised while building or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Metrics(#[from] MetricsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state injected into handlers and middleware.
#[derive(Clone, Debug)]
pub struct AppState {
    pub registry: Arc<MetricsRegistry>,
    pub service: Arc<ServiceInfo>,
}

/// HTTP server for the service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
    registry: Arc<MetricsRegistry>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Result<Self, ServerError> {
        let registry = Arc::new(MetricsRegistry::new(
            &config.observability.latency_buckets,
            config.observability.max_label_length,
        )?);

        let state = AppState {
            registry: registry.clone(),
            service: Arc::new(config.service.clone()),
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config,
            registry,
        })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers run outermost-last: the request ID is assigned before the trace
    /// span opens, and the observation middleware sees the responses produced
    /// by the timeout and panic layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::root))
            .route("/health", get(handlers::health))
            .route("/hello", get(handlers::hello))
            .route("/metrics", get(handlers::metrics))
            .with_state(state.clone())
            .layer(CatchPanicLayer::new())
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(middleware::from_fn_with_state(state, observe_requests))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(set_request_id_layer())
    }

    /// Run the server until the shutdown receiver fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            service = %self.config.service.name,
            version = %self.config.service.version,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The router with every layer applied, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the metrics registry.
    pub fn registry(&self) -> &Arc<MetricsRegistry> {
        &self.registry
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
