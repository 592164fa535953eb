//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): requests by `outcome`
//! - `relay_upstream_latency_seconds` (histogram): time to upstream headers
//! - `relay_bytes_total` (counter): body bytes forwarded to callers
//! - `relay_streams_aborted_total` (counter): streams cut short, by `side`
//!
//! Without an installed exporter every call is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::error::StartupError;

/// Install the Prometheus exporter and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), StartupError> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| StartupError::Metrics(e.to_string()))?;

    describe_counter!("relay_requests_total", "Relay requests by outcome");
    describe_histogram!(
        "relay_upstream_latency_seconds",
        Unit::Seconds,
        "Time until upstream response headers"
    );
    describe_counter!("relay_bytes_total", Unit::Bytes, "Body bytes forwarded to callers");
    describe_counter!("relay_streams_aborted_total", "Streams ended before completion");

    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(outcome: &'static str) {
    counter!("relay_requests_total", "outcome" => outcome).increment(1);
}

pub fn record_upstream_latency(start: Instant) {
    histogram!("relay_upstream_latency_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_bytes_relayed(bytes: u64) {
    if bytes > 0 {
        counter!("relay_bytes_total").increment(bytes);
    }
}

/// `side` is `"caller"` or `"upstream"`.
pub fn record_stream_aborted(side: &'static str) {
    counter!("relay_streams_aborted_total", "side" => side).increment(1);
}
