//! Classification of a finished billing call.
//!
//! Every call ends in exactly one [`Outcome`]; handlers match on it and
//! cannot mistake a rejection for a success.

use crate::billing::types::{
    BillingError, BillingResult, ResponseErrorMessage, StatusReply, RESPONSE_STATUS_OK,
};
use crate::observability::metrics;

/// Result of one billing RPC call.
#[derive(Debug)]
pub enum Outcome<T> {
    /// The service handled the request.
    Success(T),
    /// The service answered with a non-OK domain status.
    Rejected {
        status: i32,
        message: Option<ResponseErrorMessage>,
    },
    /// The exchange did not complete.
    Failed(BillingError),
}

impl<T> Outcome<T> {
    /// Classify a reply that carries a domain status.
    pub fn from_status_reply<R>(method: &'static str, result: BillingResult<R>) -> Self
    where
        R: StatusReply<Payload = T>,
    {
        let outcome = match result {
            Ok(reply) if reply.status() == RESPONSE_STATUS_OK => Outcome::Success(reply.into_parts().1),
            Ok(reply) => {
                let status = reply.status();
                let (message, _) = reply.into_parts();
                Outcome::Rejected { status, message }
            }
            Err(e) => Outcome::Failed(e),
        };
        metrics::record_billing_call(method, outcome.label());
        outcome
    }

    /// Classify a reply without a domain status: it either arrived or it did not.
    pub fn from_reply(method: &'static str, result: BillingResult<T>) -> Self {
        let outcome = match result {
            Ok(reply) => Outcome::Success(reply),
            Err(e) => Outcome::Failed(e),
        };
        metrics::record_billing_call(method, outcome.label());
        outcome
    }

    /// Short label for metrics and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Success(_) => "ok",
            Outcome::Rejected { .. } => "rejected",
            Outcome::Failed(_) => "failed",
        }
    }
}
