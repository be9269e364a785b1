//! Client for the billing management API gateway.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const DEFAULT_COOKIE_NAME: &str = "_ps_ctkn";

/// Error body returned by the gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub details: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Permission {
    pub access: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZipCode {
    pub zip: String,
    pub country: String,
    pub city: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZipCodePage {
    pub count: i32,
    pub items: Vec<ZipCode>,
}

/// Zip-code search parameters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ZipQuery {
    pub country: String,
    pub zip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

/// Identity asserted to the gateway by a trusted identity proxy.
#[derive(Debug, Clone, Default)]
pub struct Identity {
    pub user_id: String,
    pub merchant_id: String,
}

/// Raw gateway reply: status plus body, whatever the outcome.
#[derive(Debug, Clone)]
pub struct GatewayResponse {
    pub status: u16,
    pub body: String,
}

impl GatewayResponse {
    async fn read(resp: Response) -> Result<Self, reqwest::Error> {
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(Self { status, body })
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as `T`.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }

    /// Decode the body as a gateway error.
    pub fn error(&self) -> serde_json::Result<ErrorBody> {
        self.json()
    }
}

pub struct GatewayClient {
    client: Client,
    gateway_url: String,
    cookie_name: String,
}

impl GatewayClient {
    pub fn new(gateway_url: &str) -> Self {
        Self {
            client: Client::new(),
            gateway_url: gateway_url.trim_end_matches('/').to_string(),
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
        }
    }

    /// Use a non-default customer token cookie name.
    pub fn with_cookie_name(mut self, name: &str) -> Self {
        self.cookie_name = name.to_string();
        self
    }

    pub async fn health(&self) -> Result<GatewayResponse, reqwest::Error> {
        let resp = self
            .client
            .get(format!("{}/health", self.gateway_url))
            .send()
            .await?;
        GatewayResponse::read(resp).await
    }

    /// `GET /api/v1/zip`
    pub async fn find_zip_code(&self, query: &ZipQuery) -> Result<GatewayResponse, reqwest::Error> {
        let resp = self
            .client
            .get(format!("{}/api/v1/zip", self.gateway_url))
            .query(query)
            .send()
            .await?;
        GatewayResponse::read(resp).await
    }

    /// `GET /auth/api/v1/permissions`
    pub async fn get_permissions(&self, identity: &Identity) -> Result<GatewayResponse, reqwest::Error> {
        let resp = self
            .client
            .get(format!("{}/auth/api/v1/permissions", self.gateway_url))
            .header("X-Auth-User-Id", &identity.user_id)
            .header("X-Auth-Merchant-Id", &identity.merchant_id)
            .send()
            .await?;
        GatewayResponse::read(resp).await
    }

    /// `DELETE /api/v1/recurring/saved_card/remove`
    ///
    /// `token` is the customer session token; `None` sends no cookie.
    pub async fn remove_saved_card(
        &self,
        id: &str,
        token: Option<&str>,
    ) -> Result<GatewayResponse, reqwest::Error> {
        let mut req = self
            .client
            .delete(format!("{}/api/v1/recurring/saved_card/remove", self.gateway_url))
            .json(&serde_json::json!({ "id": id }));
        if let Some(token) = token {
            req = req.header(reqwest::header::COOKIE, format!("{}={}", self.cookie_name, token));
        }
        GatewayResponse::read(req.send().await?).await
    }
}
