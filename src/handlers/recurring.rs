//! Saved-card removal for recurring payments.
//!
//! The customer is identified by the session token cookie only; any
//! `cookie` field in the body is replaced.

use axum::{extract::State, http::HeaderMap, http::StatusCode};

use crate::billing::client::METHOD_DELETE_SAVED_CARD;
use crate::billing::{CallMeta, DeleteSavedCardRequest, Outcome};
use crate::errors;
use crate::http::binder::BindJson;
use crate::http::response::HttpError;
use crate::http::server::AppState;
use crate::identity::read_cookie;
use crate::validation;

const ROUTER: &str = "RecurringRoute";

/// `DELETE /api/v1/recurring/saved_card/remove`
pub async fn remove_saved_card(
    State(state): State<AppState>,
    meta: CallMeta,
    headers: HeaderMap,
    BindJson(mut req): BindJson<DeleteSavedCardRequest>,
) -> Result<StatusCode, HttpError> {
    req.cookie = read_cookie(&headers, &state.config.handlers.customer_token_cookie_name)
        .unwrap_or_default();
    validation::check(&req).map_err(HttpError::validation)?;

    let result = state.billing.delete_saved_card(&meta, req).await;
    Outcome::from_status_reply(METHOD_DELETE_SAVED_CARD, result).into_http(
        ROUTER,
        METHOD_DELETE_SAVED_CARD,
        errors::unknown,
    )?;

    Ok(StatusCode::OK)
}
