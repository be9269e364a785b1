//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the shared application state from validated configuration
//! - Bind the listener (plain or TLS) and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The billing client connects lazily, so a cold upstream does not block startup

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::billing::{BillingError, HttpBillingClient};
use crate::config::GatewayConfig;
use crate::http::{AppState, HttpServer};
use crate::identity::HeaderAuthenticator;
use crate::lifecycle::Shutdown;
use crate::net::tls::load_tls_config;

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Invalid bind address '{0}'")]
    BindAddress(String),

    #[error("Billing client: {0}")]
    Billing(#[from] BillingError),

    #[error("TLS: {0}")]
    Tls(std::io::Error),

    #[error("Server: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared state with the HTTP billing client and header authentication.
pub fn build_state(config: GatewayConfig) -> Result<AppState, StartupError> {
    let billing = HttpBillingClient::new(&config.billing)?;
    Ok(AppState::new(
        config,
        Arc::new(billing),
        Arc::new(HeaderAuthenticator),
    ))
}

/// Serve the gateway until `shutdown` fires.
pub async fn run(config: GatewayConfig, shutdown: &Shutdown) -> Result<(), StartupError> {
    let addr: SocketAddr = config
        .listener
        .bind_address
        .parse()
        .map_err(|_| StartupError::BindAddress(config.listener.bind_address.clone()))?;
    let tls = config.listener.tls.clone();

    tracing::info!(
        bind_address = %addr,
        tls = tls.is_some(),
        billing_url = %config.billing.base_url,
        billing_timeout_secs = config.billing.request_timeout_secs,
        "Configuration loaded"
    );

    let server = HttpServer::new(build_state(config)?);

    match tls {
        Some(tls) => {
            let rustls = load_tls_config(&tls).await.map_err(StartupError::Tls)?;
            server.run_tls(addr, rustls, shutdown.subscribe()).await?;
        }
        None => {
            let listener = TcpListener::bind(addr).await?;
            tracing::info!(address = %listener.local_addr()?, "Listening for connections");
            server.run(listener, shutdown.subscribe()).await?;
        }
    }

    Ok(())
}
