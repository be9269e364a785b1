//! Configuration validation.
//!
//! Serde handles syntax; this module checks values. All problems are
//! collected so an operator can fix a config file in one pass.

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending key.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a configuration, returning every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }
    if let Some(tls) = &config.listener.tls {
        if tls.cert_path.is_empty() {
            errors.push(ValidationError::new("listener.tls.cert_path", "must not be empty"));
        }
        if tls.key_path.is_empty() {
            errors.push(ValidationError::new("listener.tls.key_path", "must not be empty"));
        }
    }

    match Url::parse(&config.billing.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            "billing.base_url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new("billing.base_url", e.to_string())),
    }
    if config.billing.connect_timeout_secs == 0 {
        errors.push(ValidationError::new("billing.connect_timeout_secs", "must be positive"));
    }
    if config.billing.request_timeout_secs == 0 {
        errors.push(ValidationError::new("billing.request_timeout_secs", "must be positive"));
    }

    if config.handlers.limit_default <= 0 {
        errors.push(ValidationError::new("handlers.limit_default", "must be positive"));
    }
    if !is_cookie_name(&config.handlers.customer_token_cookie_name) {
        errors.push(ValidationError::new(
            "handlers.customer_token_cookie_name",
            format!("'{}' is not a valid cookie name", config.handlers.customer_token_cookie_name),
        ));
    }
    if config.handlers.customer_token_cookie_lifetime_secs == 0 {
        errors.push(ValidationError::new(
            "handlers.customer_token_cookie_lifetime_secs",
            "must be positive",
        ));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new("security.max_body_size", "must be positive"));
    }
    if config.security.allow_origin != "*"
        && HeaderValue::from_str(&config.security.allow_origin).is_err()
    {
        errors.push(ValidationError::new(
            "security.allow_origin",
            "must be '*' or a valid origin header value",
        ));
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("expected one of {}", LOG_LEVELS.join(", ")),
        ));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// RFC 6265 token characters.
fn is_cookie_name(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
        })
}
