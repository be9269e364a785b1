//! Request binding.
//!
//! Query and body extractors that answer every decoding failure with the
//! same fixed bind error. The rejection reason is logged, never returned.

use std::fmt::Display;
use std::str::FromStr;

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{header, request::Parts, HeaderMap},
};
use serde::{de, de::DeserializeOwned, Deserialize, Deserializer};

use crate::http::response::HttpError;

/// Query string bound into `T`.
#[derive(Debug, Clone)]
pub struct BindQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for BindQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| BindQuery(value))
            .map_err(|rejection| {
                tracing::debug!(error = %rejection, "Query binding failed");
                HttpError::bind()
            })
    }
}

/// JSON body bound into `T`.
///
/// An empty body binds to `T::default()` so that missing fields surface as
/// validation errors rather than bind errors.
#[derive(Debug, Clone)]
pub struct BindJson<T>(pub T);

impl<T, S> FromRequest<S> for BindJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json_content = has_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(error = %rejection, "Body read failed");
            HttpError::bind()
        })?;

        if bytes.is_empty() {
            return Ok(BindJson(T::default()));
        }
        if !json_content {
            tracing::debug!("Body binding failed: content type is not JSON");
            return Err(HttpError::bind());
        }

        serde_json::from_slice(&bytes).map(BindJson).map_err(|e| {
            tracing::debug!(error = %e, "Body binding failed");
            HttpError::bind()
        })
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let mime = value.split(';').next().unwrap_or_default().trim();
    mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
}

/// Treat an empty query value as absent; anything else must parse.
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}
