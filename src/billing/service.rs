//! The billing service as seen by the gateway.

use async_trait::async_trait;

use crate::billing::types::{
    BillingResult, DeleteSavedCardRequest, EmptyResponseWithStatus, FindByZipCodeRequest,
    FindByZipCodeResponse, GetPermissionsForUserRequest, GetPermissionsForUserResponse,
};

/// Per-call metadata propagated to the billing service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallMeta {
    /// Correlation ID of the inbound HTTP request.
    pub request_id: Option<String>,
}

/// Billing RPC methods used by the route handlers.
///
/// `Err` means the exchange itself failed. A reply that arrived, even a
/// negative one, is `Ok`.
#[async_trait]
pub trait BillingService: Send + Sync {
    async fn get_permissions_for_user(
        &self,
        meta: &CallMeta,
        req: GetPermissionsForUserRequest,
    ) -> BillingResult<GetPermissionsForUserResponse>;

    async fn find_by_zip_code(
        &self,
        meta: &CallMeta,
        req: FindByZipCodeRequest,
    ) -> BillingResult<FindByZipCodeResponse>;

    async fn delete_saved_card(
        &self,
        meta: &CallMeta,
        req: DeleteSavedCardRequest,
    ) -> BillingResult<EmptyResponseWithStatus>;
}
