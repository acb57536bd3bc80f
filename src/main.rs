//! image-gateway
//!
//! Fetches remote images and serves resized copies.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client                ┌──────────────────────────────────────────────────┐
//!     GET /img?url&size     │                  IMAGE GATEWAY                    │
//!     ──────────────────────┼─▶ http ──▶ pipeline                               │
//!                           │  server    ┌───────┐  ┌────────┐  ┌───────────┐   │
//!                           │            │ fetch │─▶│ detect │─▶│ transform │   │ ◀── Source
//!                           │            └───────┘  └────────┘  └─────┬─────┘   │     server
//!     ◀─────────────────────┼── response ◀────────────────────────────┘         │
//!     image/<fmt>           │                                                   │
//!     X-Image-Timings       │  config · observability · lifecycle               │
//!                           └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use image_gateway::config::loader::{load_config, PORT_ENV};
use image_gateway::config::ObservabilityConfig;
use image_gateway::lifecycle::startup;
use image_gateway::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "image-gateway")]
#[command(about = "HTTP gateway that fetches and resizes remote images", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen port; overrides PORT and the config file.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref(), |key| {
        if key == PORT_ENV {
            if let Some(port) = cli.port {
                return Some(port.to_string());
            }
        }
        std::env::var(key).ok()
    }) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&ObservabilityConfig::default());
            tracing::error!(error = %e, "Cannot start");
            std::process::exit(1);
        }
    };

    init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        port = ?config.listener.port,
        fetch_timeout_secs = ?config.fetch.timeout_secs,
        max_body_bytes = ?config.fetch.max_body_bytes,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
