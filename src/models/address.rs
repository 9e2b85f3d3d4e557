//! Account addresses: a network prefix byte followed by the 20-byte
//! Keccak-256 hash of the account's public key. Displayed as base58check.

use std::fmt;
use std::str::FromStr;

use k256::ecdsa::VerifyingKey;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use thiserror::Error;

use crate::constants::{ADDRESS_LENGTH, ADDRESS_PREFIX};
use crate::utils::sha256d;

const CHECKSUM_LENGTH: usize = 4;

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum AddressError {
    #[error("invalid base58 encoding: {0}")]
    InvalidEncoding(String),

    #[error("invalid address length: expected 21 bytes, got {0}")]
    InvalidLength(usize),

    #[error("invalid address checksum")]
    InvalidChecksum,

    #[error("invalid address prefix: {0:#04x}")]
    InvalidPrefix(u8),
}

/// A 21-byte account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    pub fn new(bytes: [u8; ADDRESS_LENGTH]) -> Result<Self, AddressError> {
        if bytes[0] != ADDRESS_PREFIX {
            return Err(AddressError::InvalidPrefix(bytes[0]));
        }
        Ok(Self(bytes))
    }

    /// Derives the address of a secp256k1 public key: Keccak-256 over the
    /// uncompressed point (without the 0x04 marker), keeping the last 20
    /// bytes behind the network prefix.
    pub fn from_public_key(key: &VerifyingKey) -> Self {
        let point = key.to_encoded_point(false);
        let digest = Keccak256::digest(&point.as_bytes()[1..]);

        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes[0] = ADDRESS_PREFIX;
        bytes[1..].copy_from_slice(&digest[12..]);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, AddressError> {
        let bytes = hex::decode(s).map_err(|e| AddressError::InvalidEncoding(e.to_string()))?;
        let array: [u8; ADDRESS_LENGTH] = bytes
            .try_into()
            .map_err(|bytes: Vec<u8>| AddressError::InvalidLength(bytes.len()))?;
        Self::new(array)
    }

    /// Base58check form: base58(address ‖ sha256d(address)[..4]).
    pub fn to_base58(&self) -> String {
        let mut payload = self.0.to_vec();
        let checksum = sha256d(&self.0);
        payload.extend_from_slice(&checksum[..CHECKSUM_LENGTH]);
        bs58::encode(payload).into_string()
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decoded = bs58::decode(s)
            .into_vec()
            .map_err(|e| AddressError::InvalidEncoding(e.to_string()))?;
        if decoded.len() != ADDRESS_LENGTH + CHECKSUM_LENGTH {
            return Err(AddressError::InvalidLength(
                decoded.len().saturating_sub(CHECKSUM_LENGTH),
            ));
        }

        let (body, checksum) = decoded.split_at(ADDRESS_LENGTH);
        let expected = sha256d(body);
        if checksum != &expected[..CHECKSUM_LENGTH] {
            return Err(AddressError::InvalidChecksum);
        }

        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes.copy_from_slice(body);
        Self::new(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Address").field(&self.to_base58()).finish()
    }
}
