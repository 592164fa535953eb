//! Relay subsystem.
//!
//! # Data Flow
//! ```text
//! GET /proxy?url=...
//!     → handler.rs (extract `url`)
//!     → validator.rs (absolute URL with a host?)
//!     → upstream.rs (GET with headers.rs identity, 200 or error)
//!     → http::response (reshape headers)
//!     → body.rs (chunked passthrough, pulled by the caller)
//! ```

pub mod body;
pub mod handler;
pub mod headers;
pub mod upstream;
pub mod validator;

pub use body::RelayBody;
pub use headers::OutboundHeaders;
pub use upstream::UpstreamClient;
pub use validator::validate;
