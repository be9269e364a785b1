//! Billing management API gateway library.

pub mod billing;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod http;
pub mod identity;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod validation;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
