//! Caller identity.
//!
//! # Data Flow
//! ```text
//! Authenticated routes:
//!     request headers → Authenticator → AuthUser (request extension)
//!     → AuthUser extractor in the handler
//!
//! Customer routes:
//!     Cookie header → cookie.rs → session token
//! ```
//!
//! # Design Decisions
//! - Token verification belongs to the identity proxy in front of the gateway
//! - Handlers read identity, they never produce it

pub mod cookie;

use std::convert::Infallible;

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};

pub use cookie::read_cookie;

pub const X_AUTH_USER_ID: &str = "x-auth-user-id";
pub const X_AUTH_USER_NAME: &str = "x-auth-user-name";
pub const X_AUTH_USER_EMAIL: &str = "x-auth-user-email";
pub const X_AUTH_USER_ROLE: &str = "x-auth-user-role";
pub const X_AUTH_MERCHANT_ID: &str = "x-auth-merchant-id";

/// Authenticated management user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub merchant_id: String,
}

/// Resolves the caller of an authenticated route.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// `None` rejects the request.
    async fn authenticate(&self, headers: &HeaderMap) -> Option<AuthUser>;
}

/// Trusts identity headers set by a fronting identity proxy.
///
/// The gateway must only be reachable through a proxy that strips or
/// overwrites client-supplied `X-Auth-*` headers; anything else lets a
/// caller claim any user. A request without a user ID is unauthenticated.
#[derive(Debug, Clone, Default)]
pub struct HeaderAuthenticator;

#[async_trait]
impl Authenticator for HeaderAuthenticator {
    async fn authenticate(&self, headers: &HeaderMap) -> Option<AuthUser> {
        let id = header_value(headers, X_AUTH_USER_ID).filter(|id| !id.is_empty())?;
        Some(AuthUser {
            id,
            name: header_value(headers, X_AUTH_USER_NAME).unwrap_or_default(),
            email: header_value(headers, X_AUTH_USER_EMAIL).unwrap_or_default(),
            role: header_value(headers, X_AUTH_USER_ROLE).unwrap_or_default(),
            merchant_id: header_value(headers, X_AUTH_MERCHANT_ID).unwrap_or_default(),
        })
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
}

/// Identity placed on the request by the auth middleware.
///
/// Routes outside the authenticated group see an empty identity.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts.extensions.get::<AuthUser>().cloned().unwrap_or_default();
        tracing::debug!(user_id = %user.id, merchant_id = %user.merchant_id, "Extracted caller identity");
        Ok(user)
    }
}
