//! Upstream billing service integration.
//!
//! # Data Flow
//! ```text
//! handler (validated request + caller identity)
//!     → service.rs (BillingService trait, CallMeta)
//!     → client.rs (JSON/HTTP RPC exchange)
//!     → outcome.rs (Success | Rejected | Failed)
//!     → http::response (HTTP status + body)
//! ```
//!
//! # Design Decisions
//! - The trait is the seam: handlers never see the transport
//! - One call per request; no retries, no caching
//! - Transport failures and domain rejections are separate variants

pub mod client;
pub mod outcome;
pub mod service;
pub mod types;

pub use client::HttpBillingClient;
pub use outcome::Outcome;
pub use service::{BillingService, CallMeta};
pub use types::{
    BillingError, BillingResult, DeleteSavedCardRequest, EmptyResponseWithStatus,
    FindByZipCodeRequest, FindByZipCodeResponse, GetPermissionsForUserRequest,
    GetPermissionsForUserResponse, Permission, ResponseErrorMessage, ZipCode, ZipCodeState,
};
