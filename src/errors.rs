//! Error bodies returned by the gateway itself.
//!
//! Codes are stable; clients match on `code`, not on `message`.

use crate::billing::ResponseErrorMessage;

pub const CODE_UNKNOWN: &str = "ma000001";
pub const CODE_VALIDATION_FAILED: &str = "ma000002";
pub const CODE_INTERNAL: &str = "ma000003";
pub const CODE_ACCESS_DENIED: &str = "ma000004";
pub const CODE_REQUEST_PARAMS_INCORRECT: &str = "ma000023";

pub const INTERNAL_ERROR_TEMPLATE: &str = "internal error";

const VALIDATION_DETAILS_MASK: &str = "field validation for '{field}' failed on the '{tag}' tag";

pub fn unknown() -> ResponseErrorMessage {
    ResponseErrorMessage::new(CODE_UNKNOWN, "unknown error. try request later")
}

pub fn internal() -> ResponseErrorMessage {
    ResponseErrorMessage::new(CODE_INTERNAL, INTERNAL_ERROR_TEMPLATE)
}

pub fn access_denied() -> ResponseErrorMessage {
    ResponseErrorMessage::new(CODE_ACCESS_DENIED, "access denied")
}

pub fn request_params_incorrect() -> ResponseErrorMessage {
    ResponseErrorMessage::new(CODE_REQUEST_PARAMS_INCORRECT, "incorrect request parameters")
}

/// Validation failure naming the offending field and rule.
pub fn validation_failed(field: &str, tag: &str) -> ResponseErrorMessage {
    let details = VALIDATION_DETAILS_MASK
        .replace("{field}", field)
        .replace("{tag}", tag);
    ResponseErrorMessage::new(CODE_VALIDATION_FAILED, "validation failed").with_details(details)
}
