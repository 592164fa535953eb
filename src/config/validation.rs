//! Configuration validation.
//!
//! Serde covers syntax; this pass checks value ranges and that identity
//! values can be sent as HTTP header values. All errors are collected, not
//! just the first.

use axum::http::HeaderValue;
use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::RelayConfig;

/// Largest accepted `upstream.chunk_size`.
pub const MAX_CHUNK_SIZE: usize = 1024 * 1024;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.host must not be empty")]
    EmptyHost,

    #[error("upstream.{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },

    #[error("upstream.chunk_size must be between 1 and {max}, got {0}", max = MAX_CHUNK_SIZE)]
    ChunkSize(usize),

    #[error("identity.{field} is not a valid header value")]
    InvalidHeaderValue { field: &'static str },

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),
}

/// Validate a configuration, returning every problem found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }

    if config.upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout { field: "connect_timeout_secs" });
    }
    if config.upstream.read_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout { field: "read_timeout_secs" });
    }

    let chunk_size = config.upstream.chunk_size;
    if chunk_size == 0 || chunk_size > MAX_CHUNK_SIZE {
        errors.push(ValidationError::ChunkSize(chunk_size));
    }

    let identity = &config.identity;
    let fields = [
        ("user_agent", &identity.user_agent),
        ("accept_language", &identity.accept_language),
        ("accept_encoding", &identity.accept_encoding),
        ("accept", &identity.accept),
        ("referer", &identity.referer),
        ("origin", &identity.origin),
    ];
    for (field, value) in fields {
        if HeaderValue::from_str(value).is_err() {
            errors.push(ValidationError::InvalidHeaderValue { field });
        }
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
