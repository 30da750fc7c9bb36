//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Select the output format (JSON for production, pretty/compact for development)
//! - Emit span close events so every request span shows up on the console
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` overrides the configured level

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::{LogFormat, ObservabilityConfig};
use super::ObservabilityError;

/// Build the log filter, preferring `RUST_LOG` over the configured directive.
pub fn build_filter(config: &ObservabilityConfig) -> Result<EnvFilter, ObservabilityError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| ObservabilityError::Filter(e.to_string()))
}

/// Install the global tracing subscriber.
///
/// Fails instead of panicking when a subscriber is already installed.
pub fn init_logging(config: &ObservabilityConfig) -> Result<(), ObservabilityError> {
    let filter = build_filter(config)?;
    let span_events = if config.span_events {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let subscriber = tracing_subscriber::registry().with(filter);

    let result = match config.log_format {
        LogFormat::Json => subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_span_events(span_events),
            )
            .try_init(),
        LogFormat::Pretty => subscriber
            .with(fmt::layer().pretty().with_span_events(span_events))
            .try_init(),
        LogFormat::Compact => subscriber
            .with(fmt::layer().compact().with_span_events(span_events))
            .try_init(),
    };

    result.map_err(|e| ObservabilityError::Subscriber(e.to_string()))
}
