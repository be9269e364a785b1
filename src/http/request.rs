//! Per-request metadata.
//!
//! # Responsibilities
//! - Name the correlation header shared with the billing service
//! - Extract [`CallMeta`] for upstream calls
//!
//! # Design Decisions
//! - Request ID is set by `SetRequestIdLayer` before any handler runs
//! - A missing or non-UTF-8 ID is simply not forwarded

use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

use crate::billing::CallMeta;

/// Header carrying the request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Request ID of the current request, if any.
pub fn request_id(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

impl<S> FromRequestParts<S> for CallMeta
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CallMeta {
            request_id: request_id(parts),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[tokio::test]
    async fn test_call_meta_from_header() {
        let (mut parts, _) = Request::builder()
            .header(X_REQUEST_ID, "abc-123")
            .body(())
            .unwrap()
            .into_parts();
        let meta = CallMeta::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(meta.request_id.as_deref(), Some("abc-123"));
    }

    #[tokio::test]
    async fn test_call_meta_without_header() {
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();
        let meta = CallMeta::from_request_parts(&mut parts, &()).await.unwrap();
        assert!(meta.request_id.is_none());
    }
}
