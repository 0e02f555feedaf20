//! chain-router
//!
//! Serves the demo item API through the template router.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server ──▶ http::request ──▶ RequestContext
//!                     (request id,                           │
//!                      trace, timeout)                       ▼
//!                                                  routing::template
//!                                                  (candidate templates)
//!                                                            │
//!                                                            ▼
//!                                                  dispatch::engine
//!                                                  (gated handler walk)
//!                                                            │
//!     Client Response                                        ▼
//!     ◀────────────── http::response ◀──────────── dispatch::emitter
//!                                                  (BufferedSink)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use chain_router::config::{load_config, RouterConfig};
use chain_router::lifecycle::{signals, Shutdown};
use chain_router::observability::{logging, metrics};
use chain_router::{catalog, HttpServer};

#[derive(Parser)]
#[command(name = "chain-router")]
#[command(about = "Serve the demo item API through the template router", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);
    tracing::info!("chain-router v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        duplicate_captures = ?config.routing.duplicate_captures,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let router = catalog::router(&config.routing)?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_listener(shutdown);

    HttpServer::new(config, router)
        .run(listener, server_shutdown)
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
