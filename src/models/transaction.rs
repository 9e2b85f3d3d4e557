//! Transaction record: a canonical unsigned payload plus the list of
//! signatures attached to it during execution.

use serde::{Deserialize, Serialize};

use crate::constants::TRANSACTION_HASH_LENGTH;
use crate::models::{Address, TransactionError};
use crate::utils::sha256;

/// A value transfer or contract invocation carried by a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractCall {
    pub owner: Address,
    pub to: Address,
    pub amount: u64,
    #[serde(default)]
    pub data: Vec<u8>,
}

/// Canonical unsigned content of a transaction.
///
/// Signing never mutates this, so its encoding (and therefore the
/// transaction hash) is stable across the whole pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionPayload {
    pub ref_block_hash: [u8; 8],
    pub expiration_ms: u64,
    pub timestamp_ms: u64,
    pub fee_limit: u64,
    pub contract: ContractCall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub payload: TransactionPayload,
    #[serde(default)]
    pub signatures: Vec<Vec<u8>>,
}

impl Transaction {
    pub fn new(payload: TransactionPayload) -> Self {
        Self {
            payload,
            signatures: Vec::new(),
        }
    }

    /// Canonical raw-byte form of the unsigned payload.
    pub fn raw_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        bincode::serialize(&self.payload)
            .map_err(|e| TransactionError::PayloadEncoding(e.to_string()))
    }

    /// SHA-256 digest of the canonical payload bytes. This is what gets
    /// signed, and its hex form is the transaction id on the network.
    pub fn digest(&self) -> Result<[u8; TRANSACTION_HASH_LENGTH], TransactionError> {
        Ok(sha256(&self.raw_bytes()?))
    }

    pub fn is_signed(&self) -> bool {
        !self.signatures.is_empty()
    }
}
