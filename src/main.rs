//! DevOps API service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ set request id ─▶ trace span ─▶ observe ─▶ timeout ─▶ catch panic ─▶ handler
//!                                                       │
//!                                                       ├─▶ request_count{method, endpoint}
//!                                                       ├─▶ request_latency_seconds{endpoint}
//!                                                       └─▶ JSON access log line
//!
//!     GET /metrics ◀── MetricsRegistry (Prometheus text)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use devops_api::config::{load_config, validate_config, ConfigError, ServiceConfig};
use devops_api::lifecycle::{wait_for_signal, Shutdown};
use devops_api::observability::init_logging;
use devops_api::HttpServer;

#[derive(Parser)]
#[command(name = "devops-api")]
#[command(about = "Minimal HTTP service with Prometheus metrics and tracing", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults are used when omitted.
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
        None => ServiceConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config_file = ?cli.config,
        "devops-api starting"
    );
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        log_format = ?config.observability.log_format,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let server = HttpServer::new(config)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        match wait_for_signal().await {
            Ok(signal) => tracing::info!(signal, "Stopping"),
            Err(e) => tracing::error!(error = %e, "Failed to listen for signals, stopping"),
        }
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
