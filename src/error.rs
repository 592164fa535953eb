//! Relay error taxonomy and its HTTP rendering.
//!
//! Every failure on the `/proxy` route ends up as one of these variants and
//! is rendered as `{"error": "<message>"}` with a 400 or 500 status. Failures
//! are always detected before the first body byte is sent.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Result type for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;

/// Errors that can occur while relaying a request.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The `url` query parameter is absent or empty.
    #[error("URL parameter is required")]
    MissingUrl,

    /// The `url` query parameter is not an absolute URL with a host.
    #[error("Invalid MP4 URL")]
    InvalidUrl,

    /// Upstream answered with something other than 200.
    #[error("Failed to fetch video. Status code: {0}")]
    UpstreamStatus(u16),

    /// The outbound request failed at the network level (DNS, connect,
    /// TLS, timeout, unsupported scheme).
    #[error("Proxy error: {}", error_chain(.0))]
    Transport(#[from] reqwest::Error),

    /// Anything else that went wrong while assembling the response.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl RelayError {
    /// Status code returned to the caller.
    ///
    /// Upstream status codes are not forwarded: a 404 from the origin is
    /// reported as 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MissingUrl | RelayError::InvalidUrl => StatusCode::BAD_REQUEST,
            RelayError::UpstreamStatus(_)
            | RelayError::Transport(_)
            | RelayError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label used for metrics and log fields.
    pub fn outcome(&self) -> &'static str {
        match self {
            RelayError::MissingUrl => "missing_url",
            RelayError::InvalidUrl => "invalid_url",
            RelayError::UpstreamStatus(_) => "upstream_status",
            RelayError::Transport(_) => "transport",
            RelayError::Unexpected(_) => "unexpected",
        }
    }
}

/// `err` followed by each of its sources, joined with `": "`.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}

/// Errors that stop the relay from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Invalid outbound header value: {0}")]
    Headers(#[from] axum::http::header::InvalidHeaderValue),

    #[error("Failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Metrics exporter error: {0}")]
    Metrics(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
