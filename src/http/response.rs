//! Handler error responses.
//!
//! # Responsibilities
//! - One error type for every handler failure
//! - Map billing outcomes to HTTP status codes
//! - Keep upstream failure detail out of response bodies
//!
//! # Design Decisions
//! - A domain rejection mirrors the domain status and message verbatim
//! - A domain status that is not a usable HTTP status becomes 500
//! - A rejection without a message is answered with a JSON `null` body

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::billing::client::SERVICE_NAME;
use crate::billing::{Outcome, ResponseErrorMessage};
use crate::errors;

/// Error returned by route handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    pub status: StatusCode,
    pub body: Option<ResponseErrorMessage>,
}

impl HttpError {
    pub fn new(status: StatusCode, body: ResponseErrorMessage) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    /// Request parameters could not be decoded.
    pub fn bind() -> Self {
        Self::new(StatusCode::BAD_REQUEST, errors::request_params_incorrect())
    }

    /// Request decoded but broke a field rule.
    pub fn validation(message: ResponseErrorMessage) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Caller could not be authenticated.
    pub fn access_denied() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, errors::access_denied())
    }

    /// Billing call did not complete.
    pub fn transport(message: ResponseErrorMessage) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Billing service answered with a non-OK domain status.
    pub fn from_domain(status: i32, message: Option<ResponseErrorMessage>) -> Self {
        Self {
            status: domain_status_code(status),
            body: message,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// HTTP status for a domain status, 500 when it is not a final HTTP status.
pub fn domain_status_code(status: i32) -> StatusCode {
    u16::try_from(status)
        .ok()
        .filter(|code| (200..600).contains(code))
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl<T> Outcome<T> {
    /// Resolve into the payload or the handler's error response.
    ///
    /// `transport_error` builds the body sent when the call itself failed;
    /// the failure is logged with the handler and method names.
    pub fn into_http(
        self,
        router: &'static str,
        method: &'static str,
        transport_error: fn() -> ResponseErrorMessage,
    ) -> Result<T, HttpError> {
        match self {
            Outcome::Success(payload) => Ok(payload),
            Outcome::Rejected { status, message } => {
                tracing::debug!(router, method, status, "Billing service rejected request");
                Err(HttpError::from_domain(status, message))
            }
            Outcome::Failed(e) => {
                tracing::error!(
                    service = SERVICE_NAME,
                    method,
                    router,
                    error = %e,
                    "Billing call failed"
                );
                Err(HttpError::transport(transport_error()))
            }
        }
    }
}
