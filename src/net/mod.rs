//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! listener.bind_address
//!     → plain TCP listener (tokio)      when listener.tls is unset
//!     → tls.rs (rustls via axum-server)  when listener.tls is set
//!     → Hand off to HTTP layer
//! ```

pub mod tls;
