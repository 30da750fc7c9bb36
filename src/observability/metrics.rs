//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Own the process-wide request counter and latency histogram
//! - Render a Prometheus text snapshot for the `/metrics` route
//!
//! # Metrics
//! - `request_count` (counter): completed requests by `method`, `endpoint`
//! - `request_latency_seconds` (histogram): latency distribution by `endpoint`
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations inside the recorder)
//! - The recorder is held by the registry and never installed globally, so
//!   every registry (one per server, one per test) is isolated
//! - `endpoint` is the raw request path without query string; no templating

use std::time::Duration;

use metrics::{Key, KeyName, Label, Level, Metadata, Recorder};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle, PrometheusRecorder};
use thiserror::Error;

/// Counter of completed requests, labelled by `method` and `endpoint`.
pub const REQUEST_COUNT: &str = "request_count";

/// Histogram of request latency in seconds, labelled by `endpoint`.
pub const REQUEST_LATENCY_SECONDS: &str = "request_latency_seconds";

/// Content type of the Prometheus text exposition format.
pub const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Failure to construct a registry.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("failed to build metrics registry: {0}")]
    Build(#[from] BuildError),
}

/// A label value the registry refused to record.
///
/// The middleware always supplies non-empty labels (axum paths start with
/// `/`), so `EmptyLabel` only fires for direct callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObservationError {
    #[error("label '{label}' is empty")]
    EmptyLabel { label: &'static str },

    #[error("label '{label}' is {len} bytes, limit is {max}")]
    LabelTooLong {
        label: &'static str,
        len: usize,
        max: usize,
    },
}

/// Process-scoped store for request counters and latency histograms.
///
/// Shared by `Arc` between the observation middleware and the exporter route.
pub struct MetricsRegistry {
    recorder: PrometheusRecorder,
    handle: PrometheusHandle,
    max_label_length: Option<usize>,
}

impl MetricsRegistry {
    /// Build a registry whose latency histogram uses the given bucket bounds.
    ///
    /// `max_label_length` is an opt-in cap on label values; `None` records
    /// every path as-is.
    pub fn new(latency_buckets: &[f64], max_label_length: Option<usize>) -> Result<Self, MetricsError> {
        let recorder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Full(REQUEST_LATENCY_SECONDS.to_string()),
                latency_buckets,
            )?
            .build_recorder();

        recorder.describe_counter(
            KeyName::from_const_str(REQUEST_COUNT),
            None,
            "Total HTTP requests".into(),
        );
        recorder.describe_histogram(
            KeyName::from_const_str(REQUEST_LATENCY_SECONDS),
            None,
            "Request latency in seconds".into(),
        );

        let handle = recorder.handle();
        Ok(Self {
            recorder,
            handle,
            max_label_length,
        })
    }

    /// Record one completed request.
    ///
    /// Adds `elapsed` to the latency histogram for `path` and increments the
    /// counter for `(method, path)`. Nothing is recorded if a label is rejected.
    pub fn observe(&self, method: &str, path: &str, elapsed: Duration) -> Result<(), ObservationError> {
        self.check_label("method", method)?;
        self.check_label("endpoint", path)?;

        let metadata = Metadata::new(module_path!(), Level::INFO, Some(module_path!()));

        let latency_key = Key::from_parts(
            REQUEST_LATENCY_SECONDS,
            vec![Label::new("endpoint", path.to_owned())],
        );
        self.recorder
            .register_histogram(&latency_key, &metadata)
            .record(elapsed.as_secs_f64());

        let count_key = Key::from_parts(
            REQUEST_COUNT,
            vec![
                Label::new("method", method.to_owned()),
                Label::new("endpoint", path.to_owned()),
            ],
        );
        self.recorder.register_counter(&count_key, &metadata).increment(1);

        Ok(())
    }

    /// Render every counter and histogram in the Prometheus text format.
    pub fn render(&self) -> String {
        self.handle.render()
    }

    fn check_label(&self, label: &'static str, value: &str) -> Result<(), ObservationError> {
        if value.is_empty() {
            return Err(ObservationError::EmptyLabel { label });
        }
        if let Some(max) = self.max_label_length {
            if value.len() > max {
                return Err(ObservationError::LabelTooLong {
                    label,
                    len: value.len(),
                    max,
                });
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for MetricsRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsRegistry")
            .field("max_label_length", &self.max_label_length)
            .finish_non_exhaustive()
    }
}
