//! Route handlers.
//!
//! # Data Flow
//! ```text
//! bind (query/body) → normalize → validate → caller identity
//!     → one billing call → Outcome → HTTP status + JSON body
//! ```
//!
//! # Route groups
//! - `/api/v1`: no authentication (customer-facing)
//! - `/auth/api/v1`: authenticated management routes
//!
//! # Design Decisions
//! - Each handler is a single pass that stops at the first failure
//! - Handlers share no mutable state

pub mod health;
pub mod permissions;
pub mod recurring;
pub mod zip_code;

pub const API_V1: &str = "/api/v1";
pub const AUTH_API_V1: &str = "/auth/api/v1";

pub const HEALTH_PATH: &str = "/health";
pub const ZIP_PATH: &str = "/api/v1/zip";
pub const SAVED_CARD_REMOVE_PATH: &str = "/api/v1/recurring/saved_card/remove";
pub const PERMISSIONS_PATH: &str = "/auth/api/v1/permissions";

#[cfg(test)]
pub(crate) mod testing;
