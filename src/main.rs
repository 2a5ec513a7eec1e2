//! Network Validation Tool REST API
//!
//! Accepts cluster network configurations over HTTP, validates them and
//! returns per-check outcomes.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ request id ─▶ trace ─▶ timeout / body limit ─▶ /nvt router
//!                                                                        │
//!                                                                        ▼
//!                                                              handlers (controller)
//!                                                               │              │
//!                                                               ▼              ▼
//!                                                     services (traits)   error mapper
//!                                                   validator, importer,  StatusTable,
//!                                                   hostnames, report,    ApiError
//!                                                   timezone
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use nvt_api::config::{load_config, override_bind_address, NvtConfig};
use nvt_api::lifecycle::{signals, Shutdown};
use nvt_api::observability::logging;
use nvt_api::HttpServer;

#[derive(Parser)]
#[command(name = "nvt-api")]
#[command(about = "REST API for validating cluster network configurations", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => NvtConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config = override_bind_address(config, bind)?;
    }

    logging::init(&config.observability);

    tracing::info!("nvt-api v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        report_dir = %config.services.report_dir.display(),
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let server = HttpServer::new(config)?;

    let shutdown = Shutdown::new();
    let signal = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_termination().await;
        shutdown.trigger();
    });

    server.run(listener, signal).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
