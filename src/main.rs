//! Billing management API gateway.
//!
//! Serves the management HTTP/JSON API and forwards each request to the
//! billing RPC service.
//!
//! ```text
//!     Client ──▶ net (TCP/TLS) ──▶ http (middleware, auth) ──▶ handlers
//!                                                               │
//!                                                               ▼
//!     Client ◀── http::response ◀── Outcome ◀── billing client ◀─┘──▶ Billing RPC
//! ```

use std::path::PathBuf;

use billing_gateway::config::{load_config, validation::validate_config, ConfigError, GatewayConfig};
use billing_gateway::lifecycle::{signals, startup, Shutdown};
use billing_gateway::observability::{logging, metrics};
use clap::Parser;

#[derive(Parser)]
#[command(name = "billing-gateway")]
#[command(about = "Management API gateway for the billing service", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "billing-gateway starting");

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    startup::run(config, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
