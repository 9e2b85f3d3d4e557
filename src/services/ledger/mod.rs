//! # Hardware Wallet
//!
//! External signing device reachable over a local transport. The device
//! holds its own key material; callers only ever see signatures.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum LedgerError {
    #[error("device transport error: {0}")]
    Transport(String),

    #[error("signing request rejected by device: {0}")]
    Rejected(String),

    #[error("malformed response from device bridge: {0}")]
    MalformedResponse(String),
}

/// Trait defining what the signing step needs from a hardware wallet.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait HardwareWallet: Send + Sync {
    /// Signs the canonical payload bytes, returning exactly one recoverable
    /// signature blob.
    async fn sign_raw(&self, raw: &[u8]) -> Result<Vec<u8>, LedgerError>;
}

mod bridge;
pub use bridge::*;
