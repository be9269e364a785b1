//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware stack)
//!     → middleware/ (authentication for the management group)
//!     → request.rs + binder.rs (request ID, typed query/body)
//!     → [handlers]
//!     → response.rs (Outcome → status + JSON body)
//!     → Send to client
//! ```

pub mod binder;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::HttpError;
pub use server::{build_router, AppState, HttpServer};
