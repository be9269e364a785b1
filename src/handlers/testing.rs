//! In-memory billing service and router helpers for handler tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body, Bytes},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::billing::{
    BillingError, BillingResult, BillingService, CallMeta, DeleteSavedCardRequest,
    EmptyResponseWithStatus, FindByZipCodeRequest, FindByZipCodeResponse,
    GetPermissionsForUserRequest, GetPermissionsForUserResponse,
};
use crate::config::GatewayConfig;
use crate::http::server::{build_router, AppState};
use crate::identity::HeaderAuthenticator;

/// Requests the mock has received.
#[derive(Debug, Default, Clone)]
pub struct Seen {
    pub permissions: Vec<GetPermissionsForUserRequest>,
    pub zip: Vec<FindByZipCodeRequest>,
    pub delete: Vec<DeleteSavedCardRequest>,
    pub meta: Vec<CallMeta>,
}

/// Replies are fixed up front; `None` fails the exchange.
#[derive(Debug, Default)]
pub struct MockBilling {
    pub permissions: Option<GetPermissionsForUserResponse>,
    pub zip: Option<FindByZipCodeResponse>,
    pub delete: Option<EmptyResponseWithStatus>,
    pub(crate) seen: Mutex<Seen>,
}

impl MockBilling {
    pub fn seen(&self) -> Seen {
        self.seen.lock().unwrap().clone()
    }

    fn reply<T: Clone>(reply: &Option<T>) -> BillingResult<T> {
        reply.clone().ok_or(BillingError::Status {
            status: 503,
            body: "billing unavailable".to_string(),
        })
    }
}

#[async_trait]
impl BillingService for MockBilling {
    async fn get_permissions_for_user(
        &self,
        meta: &CallMeta,
        req: GetPermissionsForUserRequest,
    ) -> BillingResult<GetPermissionsForUserResponse> {
        let mut seen = self.seen.lock().unwrap();
        seen.meta.push(meta.clone());
        seen.permissions.push(req);
        Self::reply(&self.permissions)
    }

    async fn find_by_zip_code(
        &self,
        meta: &CallMeta,
        req: FindByZipCodeRequest,
    ) -> BillingResult<FindByZipCodeResponse> {
        let mut seen = self.seen.lock().unwrap();
        seen.meta.push(meta.clone());
        seen.zip.push(req);
        Self::reply(&self.zip)
    }

    async fn delete_saved_card(
        &self,
        meta: &CallMeta,
        req: DeleteSavedCardRequest,
    ) -> BillingResult<EmptyResponseWithStatus> {
        let mut seen = self.seen.lock().unwrap();
        seen.meta.push(meta.clone());
        seen.delete.push(req);
        Self::reply(&self.delete)
    }
}

pub fn router_with(mock: Arc<MockBilling>, config: GatewayConfig) -> Router {
    build_router(AppState::new(config, mock, Arc::new(HeaderAuthenticator)))
}

pub fn router(mock: Arc<MockBilling>) -> Router {
    router_with(mock, GatewayConfig::default())
}

pub async fn send(router: Router, req: Request<Body>) -> (StatusCode, Bytes) {
    let response = router.oneshot(req).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body)
}

pub fn json(body: &Bytes) -> Value {
    serde_json::from_slice(body).unwrap()
}
