//! # Key Store
//!
//! Software signing backend: holds account key material and produces fully
//! signed transactions.

use async_trait::async_trait;

use crate::models::{Address, SignerError, Transaction};

#[cfg(test)]
use mockall::automock;

/// Trait defining what the signing step needs from a key store.
///
/// `sign_transaction` consumes the unsigned transaction and returns a new,
/// complete replacement carrying the signature.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait KeyStore: Send + Sync {
    async fn sign_transaction(
        &self,
        account: &Address,
        transaction: Transaction,
    ) -> Result<Transaction, SignerError>;
}

mod local;
pub use local::*;
