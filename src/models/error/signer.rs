use serde::Serialize;
use thiserror::Error;

use crate::services::ledger::LedgerError;

/// Failures of the signing step, software or hardware.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum SignerError {
    #[error("account {0} not found in key store")]
    AccountNotFound(String),

    #[error("account {0} is locked")]
    AccountLocked(String),

    #[error("invalid passphrase for account {0}")]
    InvalidPassphrase(String),

    #[error("invalid key material: {0}")]
    KeyError(String),

    #[error("failed to sign transaction: {0}")]
    SigningError(String),

    #[error("hardware wallet error: {0}")]
    Device(#[from] LedgerError),

    #[error("invalid signature returned by signer: {0}")]
    InvalidSignature(String),

    #[error("signer address {actual} does not match sender address {expected}")]
    SenderMismatch { expected: String, actual: String },
}
