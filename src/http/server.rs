//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, body limit, request ID, CORS)
//! - Guard the authenticated route group
//! - Serve over plain TCP or TLS until shutdown

use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{delete, get},
    Router,
};
use axum_server::tls_rustls::RustlsConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::billing::BillingService;
use crate::config::{GatewayConfig, SecurityConfig};
use crate::handlers::{self, health, permissions, recurring, zip_code};
use crate::http::middleware::require_auth;
use crate::identity::Authenticator;
use crate::observability::metrics;

/// In-flight requests get this long to finish after shutdown on TLS.
const TLS_DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub billing: Arc<dyn BillingService>,
    pub authenticator: Arc<dyn Authenticator>,
}

impl AppState {
    pub fn new(
        config: GatewayConfig,
        billing: Arc<dyn BillingService>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            billing,
            authenticator,
        }
    }
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(state: AppState) -> Self {
        Self {
            router: build_router(state),
        }
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Run the server with TLS on `addr` until `shutdown` fires.
    pub async fn run_tls(
        self,
        addr: SocketAddr,
        tls: RustlsConfig,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let handle = axum_server::Handle::new();
        let signal_handle = handle.clone();
        tokio::spawn(async move {
            let _ = shutdown.recv().await;
            signal_handle.graceful_shutdown(Some(TLS_DRAIN_TIMEOUT));
        });

        tracing::info!(address = %addr, "HTTPS server starting");
        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
///
/// No server-side request timeout: a slow billing call ends through the
/// billing client's own timeout as a transport error.
pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();

    let authenticated = Router::new()
        .route(handlers::PERMISSIONS_PATH, get(permissions::get_permissions))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route(handlers::HEALTH_PATH, get(health::health))
        .route(handlers::ZIP_PATH, get(zip_code::find_by_zip_code))
        .route(
            handlers::SAVED_CARD_REMOVE_PATH,
            delete(recurring::remove_saved_card),
        )
        .merge(authenticated)
        .route_layer(middleware::from_fn(metrics::track_requests))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
                .layer(cors_layer(&config.security)),
        )
}

fn cors_layer(config: &SecurityConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    if config.allow_origin == "*" {
        return layer.allow_origin(Any);
    }
    match HeaderValue::from_str(&config.allow_origin) {
        Ok(origin) => layer.allow_origin(AllowOrigin::exact(origin)),
        Err(_) => {
            tracing::warn!(allow_origin = %config.allow_origin, "Unusable CORS origin, cross-origin requests denied");
            layer.allow_origin(AllowOrigin::list(Vec::<HeaderValue>::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};

    use crate::config::GatewayConfig;
    use crate::handlers::testing::{router, router_with, send, MockBilling};
    use crate::handlers::{SAVED_CARD_REMOVE_PATH, ZIP_PATH};

    fn preflight(origin: &str) -> Request<Body> {
        Request::builder()
            .method("OPTIONS")
            .uri(ZIP_PATH)
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_cors_preflight_any_origin() {
        let response = tower::ServiceExt::oneshot(
            router(Arc::new(MockBilling::default())),
            preflight("https://merchant.example"),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn test_cors_preflight_exact_origin() {
        let mut config = GatewayConfig::default();
        config.security.allow_origin = "https://dashboard.example".to_string();
        let app = router_with(Arc::new(MockBilling::default()), config);

        let response = tower::ServiceExt::oneshot(app.clone(), preflight("https://dashboard.example"))
            .await
            .unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://dashboard.example"
        );

        let response = tower::ServiceExt::oneshot(app, preflight("https://elsewhere.example"))
            .await
            .unwrap();
        assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let mut config = GatewayConfig::default();
        config.security.max_body_size = 16;
        let mock = Arc::new(MockBilling::default());
        let body = r#"{"id":"ffffffffffffffffffffffff"}"#;
        let req = Request::builder()
            .method("DELETE")
            .uri(SAVED_CARD_REMOVE_PATH)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::CONTENT_LENGTH, body.len())
            .header(header::COOKIE, "_ps_ctkn=token")
            .body(Body::from(body))
            .unwrap();

        let (status, _) = send(router_with(mock.clone(), config), req).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(mock.seen().delete.is_empty());
    }
}
