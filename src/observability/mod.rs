//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and the billing client produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout, text or JSON lines)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through logs and into upstream calls
//! - Upstream failure detail goes to logs only, never to clients

pub mod logging;
pub mod metrics;
