//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Relay handler / body / server
//!     → logging.rs (structured tracing events, per-request spans)
//!     → metrics.rs (counters and latency histogram)
//!
//! Consumers:
//!     → stdout (fmt subscriber)
//!     → Prometheus scrape endpoint (optional)
//! ```

pub mod logging;
pub mod metrics;
