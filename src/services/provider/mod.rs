//! # Network Provider
//!
//! Interface to a ledger network node: broadcasting signed transactions into
//! the pending pool and fetching execution receipts by transaction hash.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::models::{BroadcastResult, Transaction, TransactionReceipt};

#[cfg(test)]
use mockall::automock;

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum ProviderError {
    #[error("request timeout")]
    Timeout,

    #[error("request error (HTTP {status_code}): {error}")]
    RequestError { error: String, status_code: u16 },

    #[error("transport error: {0}")]
    TransportError(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("transaction not found")]
    NotFound,
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return ProviderError::Timeout;
        }
        if let Some(status) = err.status() {
            return ProviderError::RequestError {
                error: err.to_string(),
                status_code: status.as_u16(),
            };
        }
        ProviderError::TransportError(err.to_string())
    }
}

/// Trait defining what the execution pipeline needs from a network client.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait NetworkProvider: Send + Sync {
    /// Submits a signed transaction to the network's pending pool.
    ///
    /// Transport and protocol failures are `Err`; an application-level
    /// rejection comes back as an acknowledgment with a non-zero code so the
    /// two stay distinguishable.
    async fn broadcast(&self, tx: &Transaction) -> Result<BroadcastResult, ProviderError>;

    /// Fetches the execution receipt of a transaction by its hex hash.
    ///
    /// Any error is treated by the confirmation loop as "not yet available"
    /// and retried until the wait budget runs out.
    async fn get_transaction_receipt(
        &self,
        tx_id: &str,
    ) -> Result<TransactionReceipt, ProviderError>;
}

mod http;
pub use http::*;
