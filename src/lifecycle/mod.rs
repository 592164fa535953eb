//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! signals.rs: SIGINT / SIGTERM
//!     → Shutdown::trigger (shutdown.rs)
//!     → HttpServer stops accepting, drains in-flight streams
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
