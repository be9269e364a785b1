//! Billing RPC message types and error definitions.
//!
//! Field names follow the JSON encoding of the billing service's messages.
//! Every field tolerates absence so that a sparse reply still decodes.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::validation::{validate_country, validate_object_id, validate_required, FieldOrder};

/// Domain status reported by the billing service on success.
pub const RESPONSE_STATUS_OK: i32 = 200;
pub const RESPONSE_STATUS_BAD_DATA: i32 = 400;
pub const RESPONSE_STATUS_NOT_FOUND: i32 = 404;

/// Structured error carried by failed replies and by gateway error bodies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseErrorMessage {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub details: String,
}

impl ResponseErrorMessage {
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: String::new(),
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }
}

/// A named permission granted to a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Permission {
    pub access: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetPermissionsForUserRequest {
    pub user_id: String,
    pub merchant_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetPermissionsForUserResponse {
    pub status: i32,
    pub message: Option<ResponseErrorMessage>,
    pub permissions: Vec<Permission>,
}

/// Zip-code search by country and zip prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct FindByZipCodeRequest {
    #[validate(custom(function = "validate_country"))]
    pub country: String,
    #[validate(custom(function = "validate_required"))]
    pub zip: String,
    pub limit: i64,
    pub offset: i64,
}

impl FieldOrder for FindByZipCodeRequest {
    const FIELDS: &'static [&'static str] = &["country", "zip", "limit", "offset"];
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZipCodeState {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZipCode {
    pub zip: String,
    pub country: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<ZipCodeState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Zip-code search result. Carries no domain status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FindByZipCodeResponse {
    pub count: i32,
    pub items: Vec<ZipCode>,
}

/// Removal of a customer's saved card.
///
/// `cookie` is the customer session token; it is always taken from the
/// request cookie, never from the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DeleteSavedCardRequest {
    #[validate(custom(function = "validate_object_id"))]
    pub id: String,
    #[validate(custom(function = "validate_required"))]
    pub cookie: String,
}

impl FieldOrder for DeleteSavedCardRequest {
    const FIELDS: &'static [&'static str] = &["id", "cookie"];
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmptyResponseWithStatus {
    pub status: i32,
    pub message: Option<ResponseErrorMessage>,
}

/// A reply that reports its own domain outcome.
pub trait StatusReply {
    type Payload;

    fn status(&self) -> i32;

    /// Split into the error message and the payload.
    fn into_parts(self) -> (Option<ResponseErrorMessage>, Self::Payload);
}

impl StatusReply for GetPermissionsForUserResponse {
    type Payload = Vec<Permission>;

    fn status(&self) -> i32 {
        self.status
    }

    fn into_parts(self) -> (Option<ResponseErrorMessage>, Vec<Permission>) {
        (self.message, self.permissions)
    }
}

impl StatusReply for EmptyResponseWithStatus {
    type Payload = ();

    fn status(&self) -> i32 {
        self.status
    }

    fn into_parts(self) -> (Option<ResponseErrorMessage>, ()) {
        (self.message, ())
    }
}

/// Errors that prevent an RPC exchange from completing.
#[derive(Debug, Error)]
pub enum BillingError {
    /// Connection, timeout or protocol failure.
    #[error("billing transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The RPC endpoint answered with a non-success HTTP status.
    #[error("billing endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The reply body was not the expected message.
    #[error("billing reply could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured endpoint URL is unusable.
    #[error("invalid billing endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Result type for billing RPC calls.
pub type BillingResult<T> = Result<T, BillingError>;
