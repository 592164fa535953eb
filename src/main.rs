//! video-relay
//!
//! Streams remote video through a US-hosted relay.
//!
//! ```text
//!   Caller                        video-relay                         Upstream
//!     │  GET /proxy?url=X   ┌──────────────────────────┐                  │
//!     ├────────────────────▶│ validate X               │                  │
//!     │                     │ GET X + identity headers ├─────────────────▶│
//!     │                     │ status == 200 ?          │◀─────────────────┤
//!     │◀────────────────────┤ reshape headers          │  body frames     │
//!     │   ≤ 8 KiB chunks    │ stream body (pulled)     │◀─────────────────┤
//!                           └──────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use video_relay::config::{load_config, validate_config, ConfigError, RelayConfig};
use video_relay::lifecycle::{signals::wait_for_shutdown_signal, Shutdown};
use video_relay::observability::{logging, metrics};
use video_relay::{HttpServer, StartupError};

#[derive(Parser)]
#[command(name = "video-relay", version)]
#[command(about = "Streaming HTTP relay for remote video files", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interface to bind.
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on.
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,
}

impl Cli {
    fn resolve_config(&self) -> Result<RelayConfig, StartupError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => RelayConfig::default(),
        };
        if let Some(host) = &self.host {
            config.listener.host = host.clone();
        }
        if let Some(port) = self.port {
            config.listener.port = port;
        }
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    logging::init_logging(&config.observability.log_level);

    tracing::info!("video-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        connect_timeout_secs = config.upstream.connect_timeout_secs,
        read_timeout_secs = config.upstream.read_timeout_secs,
        chunk_size = config.upstream.chunk_size,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
