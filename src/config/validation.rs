//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check histogram bucket layout
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("service.name must not be empty")]
    EmptyServiceName,

    #[error("observability.latency_buckets must not be empty")]
    NoLatencyBuckets,

    #[error("observability.latency_buckets[{index}] = {value} is not a finite non-negative number")]
    InvalidBucket { index: usize, value: f64 },

    #[error("observability.latency_buckets must be strictly increasing (index {index})")]
    UnorderedBuckets { index: usize },

    #[error("observability.max_label_length must be greater than zero when set")]
    ZeroLabelLength,
}

/// Check a configuration for semantic errors.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.service.name.trim().is_empty() {
        errors.push(ValidationError::EmptyServiceName);
    }

    let buckets = &config.observability.latency_buckets;
    if buckets.is_empty() {
        errors.push(ValidationError::NoLatencyBuckets);
    }
    for (index, &value) in buckets.iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            errors.push(ValidationError::InvalidBucket { index, value });
        } else if index > 0 && value <= buckets[index - 1] {
            errors.push(ValidationError::UnorderedBuckets { index });
        }
    }

    if config.observability.max_label_length == Some(0) {
        errors.push(ValidationError::ZeroLabelLength);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
