//! Single-route HTTP streaming relay.
//!
//! `GET /proxy?url=<target>` fetches the target with a fixed US browser
//! identity and streams the body back in bounded chunks.

pub mod config;
pub mod error;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod relay;

pub use config::RelayConfig;
pub use error::{RelayError, StartupError};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
