//! In-memory key store with a per-account passphrase lock.

use std::collections::HashMap;

use async_trait::async_trait;
use k256::ecdsa::SigningKey;
use parking_lot::RwLock;

use super::KeyStore;
use crate::models::{Address, SignerError, Transaction};
use crate::utils::sha256;

struct StoredAccount {
    key: SigningKey,
    passphrase_hash: [u8; 32],
    unlocked: bool,
}

/// Key store holding secp256k1 keys in memory.
///
/// Accounts are imported locked and must be unlocked with their passphrase
/// before they can sign.
#[derive(Default)]
pub struct LocalKeyStore {
    accounts: RwLock<HashMap<Address, StoredAccount>>,
}

impl LocalKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Imports raw key material under a passphrase, returning the derived
    /// account address. The account starts locked.
    pub fn import_key(&self, raw_key: &[u8], passphrase: &str) -> Result<Address, SignerError> {
        let key = SigningKey::from_slice(raw_key).map_err(|e| SignerError::KeyError(e.to_string()))?;
        let address = Address::from_public_key(key.verifying_key());

        self.accounts.write().insert(
            address,
            StoredAccount {
                key,
                passphrase_hash: sha256(passphrase.as_bytes()),
                unlocked: false,
            },
        );
        Ok(address)
    }

    pub fn unlock(&self, account: &Address, passphrase: &str) -> Result<(), SignerError> {
        let mut accounts = self.accounts.write();
        let stored = accounts
            .get_mut(account)
            .ok_or_else(|| SignerError::AccountNotFound(account.to_string()))?;

        if stored.passphrase_hash != sha256(passphrase.as_bytes()) {
            return Err(SignerError::InvalidPassphrase(account.to_string()));
        }
        stored.unlocked = true;
        Ok(())
    }

    pub fn lock(&self, account: &Address) -> Result<(), SignerError> {
        let mut accounts = self.accounts.write();
        let stored = accounts
            .get_mut(account)
            .ok_or_else(|| SignerError::AccountNotFound(account.to_string()))?;
        stored.unlocked = false;
        Ok(())
    }

    pub fn contains(&self, account: &Address) -> bool {
        self.accounts.read().contains_key(account)
    }
}

#[async_trait]
impl KeyStore for LocalKeyStore {
    async fn sign_transaction(
        &self,
        account: &Address,
        mut transaction: Transaction,
    ) -> Result<Transaction, SignerError> {
        let key = {
            let accounts = self.accounts.read();
            let stored = accounts
                .get(account)
                .ok_or_else(|| SignerError::AccountNotFound(account.to_string()))?;
            if !stored.unlocked {
                return Err(SignerError::AccountLocked(account.to_string()));
            }
            stored.key.clone()
        };

        let digest = transaction
            .digest()
            .map_err(|e| SignerError::SigningError(e.to_string()))?;
        let (signature, recovery_id) = key
            .sign_prehash_recoverable(&digest)
            .map_err(|e| SignerError::SigningError(e.to_string()))?;

        let mut sig = signature.to_bytes().to_vec();
        sig.push(recovery_id.to_byte());

        // The returned transaction is a complete replacement; any previously
        // attached signatures are discarded.
        transaction.signatures = vec![sig];
        Ok(transaction)
    }
}
