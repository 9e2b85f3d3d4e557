//! Recovery of signer addresses from recoverable ECDSA signatures.

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use serde::Serialize;

use crate::constants::RECOVERABLE_SIGNATURE_LENGTH;
use crate::models::Address;

#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize)]
pub enum RecoveryError {
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("public key recovery failed: {0}")]
    RecoveryFailed(String),
}

/// Recovers the signing address from a 65-byte recoverable signature
/// (r ‖ s ‖ recovery id) over a pre-hashed message.
///
/// Recovery ids of 0/1 and the legacy 27/28 offsets are both accepted.
pub fn recover_address(digest: &[u8; 32], signature: &[u8]) -> Result<Address, RecoveryError> {
    if signature.len() != RECOVERABLE_SIGNATURE_LENGTH {
        return Err(RecoveryError::InvalidSignature(format!(
            "expected {} bytes, got {}",
            RECOVERABLE_SIGNATURE_LENGTH,
            signature.len()
        )));
    }

    let sig = Signature::from_slice(&signature[..64])
        .map_err(|e| RecoveryError::InvalidSignature(e.to_string()))?;

    let v = signature[64];
    let v = if v >= 27 { v - 27 } else { v };
    let recovery_id = RecoveryId::try_from(v)
        .map_err(|e| RecoveryError::InvalidSignature(format!("recovery id {}: {}", v, e)))?;

    let key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id)
        .map_err(|e| RecoveryError::RecoveryFailed(e.to_string()))?;

    Ok(Address::from_public_key(&key))
}
