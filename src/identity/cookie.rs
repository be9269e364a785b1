//! Cookie lookup.

use axum::http::{header, HeaderMap};

/// Value of the first cookie named `name`, across all `Cookie` headers.
///
/// Surrounding double quotes are stripped. An empty value is returned as is;
/// callers decide whether that counts as missing.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|line| line.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
}
