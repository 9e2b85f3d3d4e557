use std::time::Duration;

/// Recoverable ECDSA signature length: 32 bytes (r) + 32 bytes (s) + 1 byte (recovery id)
pub const RECOVERABLE_SIGNATURE_LENGTH: usize = 65;

/// SHA-256 transaction digest length
pub const TRANSACTION_HASH_LENGTH: usize = 32;

/// Network prefix byte of account addresses
pub const ADDRESS_PREFIX: u8 = 0x41;

/// Account address length: prefix byte + 20 bytes of the public key hash
pub const ADDRESS_LENGTH: usize = 21;

/// Cadence of the confirmation polling loop
pub const CONFIRMATION_POLL_INTERVAL: Duration = Duration::from_secs(1);
