//! Zip-code lookup.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::billing::client::METHOD_FIND_BY_ZIP_CODE;
use crate::billing::{CallMeta, FindByZipCodeRequest, FindByZipCodeResponse, Outcome};
use crate::errors;
use crate::http::binder::{empty_as_none, BindQuery};
use crate::http::response::HttpError;
use crate::http::server::AppState;
use crate::validation;

const ROUTER: &str = "ZipCodeRoute";

/// Query parameters as sent by the client.
#[derive(Debug, Default, Deserialize)]
pub struct ZipCodeQuery {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub offset: Option<i64>,
}

impl ZipCodeQuery {
    /// Missing or non-positive limit falls back to `limit_default`.
    pub fn into_request(self, limit_default: i64) -> FindByZipCodeRequest {
        FindByZipCodeRequest {
            country: self.country,
            zip: self.zip,
            limit: self.limit.filter(|limit| *limit > 0).unwrap_or(limit_default),
            offset: self.offset.unwrap_or_default(),
        }
    }
}

/// `GET /api/v1/zip`
pub async fn find_by_zip_code(
    State(state): State<AppState>,
    meta: CallMeta,
    BindQuery(query): BindQuery<ZipCodeQuery>,
) -> Result<Json<FindByZipCodeResponse>, HttpError> {
    let req = query.into_request(state.config.handlers.limit_default);
    validation::check(&req).map_err(HttpError::validation)?;

    let result = state.billing.find_by_zip_code(&meta, req).await;
    let reply = Outcome::from_reply(METHOD_FIND_BY_ZIP_CODE, result).into_http(
        ROUTER,
        METHOD_FIND_BY_ZIP_CODE,
        errors::unknown,
    )?;

    Ok(Json(reply))
}
