use serde::Serialize;
use thiserror::Error;

use crate::models::{ResponseCode, SignerError};
use crate::services::provider::ProviderError;

/// Errors of the transaction execution pipeline.
///
/// Two tiers share this enum but never the same slot: fatal errors halt the
/// pipeline and are returned by `execute`. `ExecutionFailed` is informational
/// only (the network accepted the transaction but its on-chain execution
/// reported failure) and is surfaced through a separate accessor.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum TransactionError {
    /// Returned when invalid parameters are given to the controller; the
    /// pipeline never starts, so callers can tell "never executed" from
    /// "executed and failed".
    #[error("transaction has bad parameters")]
    BadTransactionParam,

    #[error("failed to encode transaction payload: {0}")]
    PayloadEncoding(String),

    #[error("signer error: {0}")]
    Signer(#[from] SignerError),

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("transaction rejected by network: {message}")]
    BroadcastRejected { code: ResponseCode, message: String },

    #[error("could not confirm transaction after {0} seconds")]
    ConfirmationTimeout(u32),

    /// Informational only; never set as the fatal pipeline error.
    #[error("transaction execution failed: {0}")]
    ExecutionFailed(String),
}
