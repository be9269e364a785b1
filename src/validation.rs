//! Request validation.
//!
//! Request messages derive [`validator::Validate`]; the rules below report
//! failures with short tags (`required`, `len`, `hexadecimal`, ...) that end
//! up in the `details` of a validation error body:
//!
//! ```text
//! field validation for 'Country' failed on the 'required' tag
//! ```
//!
//! Only the first failing field is reported, in declaration order.

use validator::{Validate, ValidationError, ValidationErrors};

use crate::billing::ResponseErrorMessage;
use crate::errors;

const COUNTRY_CODE_LEN: usize = 2;
const OBJECT_ID_LEN: usize = 24;

/// Declaration order of a request's fields.
pub trait FieldOrder {
    const FIELDS: &'static [&'static str];
}

/// Validate `value`, describing the first failing field on error.
pub fn check<T: Validate + FieldOrder>(value: &T) -> Result<(), ResponseErrorMessage> {
    match value.validate() {
        Ok(()) => Ok(()),
        Err(errs) => {
            let (field, tag) = first_violation(&errs, T::FIELDS)
                .unwrap_or_else(|| ("request".to_string(), "valid".to_string()));
            Err(errors::validation_failed(&field_display_name(&field), &tag))
        }
    }
}

/// First failing field, preferring `order` and falling back to name order.
pub fn first_violation(errs: &ValidationErrors, order: &[&str]) -> Option<(String, String)> {
    let field_errors = errs.field_errors();

    let declared = order
        .iter()
        .find_map(|field| field_errors.get(*field).map(|list| (field.to_string(), *list)));

    let found = declared.or_else(|| {
        let mut rest: Vec<_> = field_errors
            .iter()
            .map(|(field, list)| (field.to_string(), *list))
            .collect();
        rest.sort_by(|a, b| a.0.cmp(&b.0));
        rest.into_iter().next()
    });

    found.and_then(|(field, list)| list.first().map(|err| (field, err.code.to_string())))
}

/// `merchant_id` → `MerchantId`.
pub fn field_display_name(field: &str) -> String {
    field
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

pub fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// ISO 3166-1 alpha-2 code.
pub fn validate_country(value: &str) -> Result<(), ValidationError> {
    validate_required(value)?;
    if value.chars().count() != COUNTRY_CODE_LEN {
        return Err(ValidationError::new("len"));
    }
    if !value.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::new("alpha"));
    }
    Ok(())
}

/// 24 hex digit storage identifier.
pub fn validate_object_id(value: &str) -> Result<(), ValidationError> {
    validate_required(value)?;
    if !value.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ValidationError::new("hexadecimal"));
    }
    if value.len() != OBJECT_ID_LEN {
        return Err(ValidationError::new("len"));
    }
    Ok(())
}
