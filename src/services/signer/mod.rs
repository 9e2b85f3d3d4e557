//! # Signing Strategy
//!
//! Dispatch between the two signing backends of the execution pipeline.
//!
//! ```text
//! SigningStrategy (trait implementations)
//!   ├── SoftwareSigner   - key store signs; transaction object is replaced
//!   └── HardwareSigner   - external device signs; signature appended in place
//! ```
//!
//! The replace/append asymmetry is part of the contract: a key store returns
//! a complete, independently valid replacement transaction, while a hardware
//! wallet only ever returns one signature blob that gets attached to the
//! existing signature list.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::{Address, SignerError, Transaction, TransactionError};
use crate::services::keystore::KeyStore;
use crate::services::ledger::HardwareWallet;
use crate::utils::{recover_address, sha256};

/// The closed set of signing implementations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignerImpl {
    #[default]
    Software,
    Hardware,
}

/// Capability of attaching a signature to a transaction.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    async fn sign(&self, tx: &mut Transaction) -> Result<(), SignerError>;
}

/// Identity the controller signs with: either an account bound to a key
/// store, or a hardware wallet expected to sign as a known sender.
pub enum SignerIdentity<K, H>
where
    K: KeyStore,
    H: HardwareWallet,
{
    Software { keystore: Arc<K>, account: Address },
    Hardware { device: Arc<H>, sender: Address },
}

impl<K, H> SignerIdentity<K, H>
where
    K: KeyStore,
    H: HardwareWallet,
{
    pub fn software(keystore: Arc<K>, account: Address) -> Self {
        Self::Software { keystore, account }
    }

    pub fn hardware(device: Arc<H>, sender: Address) -> Self {
        Self::Hardware { device, sender }
    }

    /// The signing implementation this identity naturally selects.
    pub fn signing_impl(&self) -> SignerImpl {
        match self {
            Self::Software { .. } => SignerImpl::Software,
            Self::Hardware { .. } => SignerImpl::Hardware,
        }
    }
}

/// Software signing: the key store produces a fully signed replacement for
/// the transaction.
pub struct SoftwareSigner<K: KeyStore> {
    keystore: Arc<K>,
    account: Address,
}

impl<K: KeyStore> SoftwareSigner<K> {
    pub fn new(keystore: Arc<K>, account: Address) -> Self {
        Self { keystore, account }
    }
}

#[async_trait]
impl<K: KeyStore> TransactionSigner for SoftwareSigner<K> {
    async fn sign(&self, tx: &mut Transaction) -> Result<(), SignerError> {
        let signed = self
            .keystore
            .sign_transaction(&self.account, tx.clone())
            .await?;
        *tx = signed;
        Ok(())
    }
}

/// Hardware signing: the device signs the canonical payload bytes and the
/// returned signature is appended to the transaction's signature list.
///
/// Before accepting the signature, the signer address is recovered from it
/// and must match the expected sender; a device signing with the wrong key
/// halts the pipeline.
pub struct HardwareSigner<H: HardwareWallet> {
    device: Arc<H>,
    sender: Address,
}

impl<H: HardwareWallet> HardwareSigner<H> {
    pub fn new(device: Arc<H>, sender: Address) -> Self {
        Self { device, sender }
    }
}

#[async_trait]
impl<H: HardwareWallet> TransactionSigner for HardwareSigner<H> {
    async fn sign(&self, tx: &mut Transaction) -> Result<(), SignerError> {
        let raw = tx
            .raw_bytes()
            .map_err(|e| SignerError::SigningError(e.to_string()))?;
        let signature = self.device.sign_raw(&raw).await?;

        let digest = sha256(&raw);
        let recovered = recover_address(&digest, &signature)
            .map_err(|e| SignerError::InvalidSignature(e.to_string()))?;
        if recovered != self.sender {
            return Err(SignerError::SenderMismatch {
                expected: self.sender.to_string(),
                actual: recovered.to_string(),
            });
        }

        tx.signatures.push(signature);
        Ok(())
    }
}

/// The two signing strategies, dispatched by match.
pub enum SigningStrategy<K, H>
where
    K: KeyStore,
    H: HardwareWallet,
{
    Software(SoftwareSigner<K>),
    Hardware(HardwareSigner<H>),
}

#[async_trait]
impl<K, H> TransactionSigner for SigningStrategy<K, H>
where
    K: KeyStore,
    H: HardwareWallet,
{
    async fn sign(&self, tx: &mut Transaction) -> Result<(), SignerError> {
        match self {
            Self::Software(signer) => signer.sign(tx).await,
            Self::Hardware(signer) => signer.sign(tx).await,
        }
    }
}

/// Selects the strategy for a signing implementation tag.
///
/// The tag and the supplied identity must agree; a mismatch is a
/// bad-parameter error, not a pipeline failure.
pub fn select_strategy<K, H>(
    tag: SignerImpl,
    identity: SignerIdentity<K, H>,
) -> Result<SigningStrategy<K, H>, TransactionError>
where
    K: KeyStore,
    H: HardwareWallet,
{
    match (tag, identity) {
        (SignerImpl::Software, SignerIdentity::Software { keystore, account }) => Ok(
            SigningStrategy::Software(SoftwareSigner::new(keystore, account)),
        ),
        (SignerImpl::Hardware, SignerIdentity::Hardware { device, sender }) => Ok(
            SigningStrategy::Hardware(HardwareSigner::new(device, sender)),
        ),
        _ => Err(TransactionError::BadTransactionParam),
    }
}
