//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Every request produces:
//!     → metrics.rs (request counter, latency histogram)
//!     → logging.rs (one structured log event)
//!     → tracing.rs (an http_request span with correlation IDs)
//!
//! Consumers:
//!     → Log aggregation (stdout, JSON lines)
//!     → Metrics endpoint (Prometheus scrape of GET /metrics)
//!     → Span close events on the console
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows through span and response headers
//! - Metrics are cheap (atomic increments)
//! - The metrics registry is an explicit object, not a global recorder

pub mod logging;
pub mod metrics;
pub mod tracing;

use thiserror::Error;

pub use self::logging::init_logging;
pub use self::metrics::{MetricsError, MetricsRegistry, ObservationError};
pub use self::tracing::{make_request_span, TraceContext};

/// Errors raised while bringing up the observability stack.
#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("invalid log filter: {0}")]
    Filter(String),

    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(String),
}
