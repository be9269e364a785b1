//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use billing_gateway::config::GatewayConfig;
use billing_gateway::http::HttpServer;
use billing_gateway::lifecycle::{startup, Shutdown};
use serde_json::Value;
use tokio::net::TcpListener;

/// Start a programmable billing RPC endpoint on an ephemeral port.
///
/// `f` receives the RPC method name and the decoded request message and
/// returns the HTTP status and raw reply body. Returns the base URL.
pub async fn start_programmable_billing<F, Fut>(f: F) -> String
where
    F: Fn(String, Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let f = Arc::new(f);
    let app = Router::new().route(
        "/BillingService/{method}",
        post(move |Path(method): Path<String>, body: String| {
            let f = f.clone();
            async move {
                let message = serde_json::from_str(&body).unwrap_or(Value::Null);
                let (status, reply) = f(method, message).await;
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::OK);
                (status, [("content-type", "application/json")], reply)
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}/")
}

/// Start a billing endpoint that answers every call with the same reply.
#[allow(dead_code)]
pub async fn start_billing(reply: Value) -> String {
    start_programmable_billing(move |_, _| {
        let reply = reply.to_string();
        async move { (200, reply) }
    })
    .await
}

/// Base URL on which nothing listens.
#[allow(dead_code)]
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/")
}

/// Gateway configuration pointing at `billing_url`.
pub fn gateway_config(billing_url: &str) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.billing.base_url = billing_url.to_string();
    config.billing.connect_timeout_secs = 1;
    config.billing.request_timeout_secs = 1;
    config
}

/// Start the gateway on an ephemeral port. Returns its base URL.
pub async fn start_gateway(config: GatewayConfig) -> (String, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = startup::build_state(config).unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = HttpServer::new(state).run(listener, rx).await;
    });

    (format!("http://{addr}"), shutdown)
}
