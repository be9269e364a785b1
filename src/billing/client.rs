//! Billing RPC client over JSON/HTTP.
//!
//! # Wire format
//! ```text
//! POST {base_url}BillingService/{Method}
//! Content-Type: application/json
//! X-Request-Id: <inbound request id>
//!
//! <request message as JSON>  →  200 OK, <response message as JSON>
//! ```
//!
//! Anything other than a decodable 2xx reply is a transport error. Domain
//! outcomes travel inside the reply's `status`/`message` fields.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::billing::service::{BillingService, CallMeta};
use crate::billing::types::{
    BillingError, BillingResult, DeleteSavedCardRequest, EmptyResponseWithStatus,
    FindByZipCodeRequest, FindByZipCodeResponse, GetPermissionsForUserRequest,
    GetPermissionsForUserResponse,
};
use crate::config::BillingConfig;
use crate::http::X_REQUEST_ID;

/// RPC service name that prefixes every method path.
pub const SERVICE_NAME: &str = "BillingService";

pub const METHOD_GET_PERMISSIONS_FOR_USER: &str = "GetPermissionsForUser";
pub const METHOD_FIND_BY_ZIP_CODE: &str = "FindByZipCode";
pub const METHOD_DELETE_SAVED_CARD: &str = "DeleteSavedCard";

/// HTTP client for the billing RPC endpoint.
#[derive(Clone)]
pub struct HttpBillingClient {
    client: Client,
    base_url: Url,
}

impl HttpBillingClient {
    /// Create a client for the configured endpoint.
    ///
    /// No connection is made until the first call.
    pub fn new(config: &BillingConfig) -> BillingResult<Self> {
        let mut base_url = Url::parse(&config.base_url).map_err(|e| {
            BillingError::InvalidEndpoint(format!("'{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(BillingError::InvalidEndpoint(format!(
                "'{}' cannot be used as a base URL",
                config.base_url
            )));
        }
        // Url::join replaces the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        tracing::info!(base_url = %base_url, "Billing client initialized");

        Ok(Self { client, base_url })
    }

    /// Full URL of an RPC method.
    pub fn endpoint(&self, method: &str) -> BillingResult<Url> {
        self.base_url
            .join(&format!("{SERVICE_NAME}/{method}"))
            .map_err(|e| BillingError::InvalidEndpoint(e.to_string()))
    }

    async fn call<Req, Resp>(&self, meta: &CallMeta, method: &'static str, req: &Req) -> BillingResult<Resp>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = self.endpoint(method)?;
        let start = Instant::now();

        let mut builder = self.client.post(url).json(req);
        if let Some(request_id) = &meta.request_id {
            builder = builder.header(X_REQUEST_ID, request_id);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BillingError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let reply = serde_json::from_slice(&bytes)?;

        tracing::debug!(
            method,
            request_id = meta.request_id.as_deref().unwrap_or("-"),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Billing call completed"
        );

        Ok(reply)
    }
}

#[async_trait]
impl BillingService for HttpBillingClient {
    async fn get_permissions_for_user(
        &self,
        meta: &CallMeta,
        req: GetPermissionsForUserRequest,
    ) -> BillingResult<GetPermissionsForUserResponse> {
        self.call(meta, METHOD_GET_PERMISSIONS_FOR_USER, &req).await
    }

    async fn find_by_zip_code(
        &self,
        meta: &CallMeta,
        req: FindByZipCodeRequest,
    ) -> BillingResult<FindByZipCodeResponse> {
        self.call(meta, METHOD_FIND_BY_ZIP_CODE, &req).await
    }

    async fn delete_saved_card(
        &self,
        meta: &CallMeta,
        req: DeleteSavedCardRequest,
    ) -> BillingResult<EmptyResponseWithStatus> {
        self.call(meta, METHOD_DELETE_SAVED_CARD, &req).await
    }
}

impl std::fmt::Debug for HttpBillingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBillingClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}
