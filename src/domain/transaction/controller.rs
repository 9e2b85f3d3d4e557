//! # Transaction Controller
//!
//! Drives the transaction signing and submission process. Each stage of the
//! pipeline becomes a no-op once a fatal error has been recorded in any
//! previous step, so the whole run composes linearly and returns the first
//! error unchanged.
//!
//! One controller instance is created per transaction, configured once
//! through behavior options, executed once, then inspected through the
//! result accessors.

use log::debug;

use super::status::ConfirmationState;
use crate::models::{BroadcastResult, Transaction, TransactionError, TransactionReceipt};
use crate::services::keystore::KeyStore;
use crate::services::ledger::HardwareWallet;
use crate::services::provider::NetworkProvider;
use crate::services::signer::{
    select_strategy, SignerIdentity, SignerImpl, SigningStrategy, TransactionSigner,
};

/// Behavioral configuration of one execution, immutable once `execute`
/// starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExecutionBehavior {
    /// Skip broadcast and confirmation entirely, stubbing a synthetic
    /// receipt.
    pub dry_run: bool,
    pub signing_impl: SignerImpl,
    /// Maximum wall-clock seconds to poll for a receipt; zero disables
    /// polling ("trust immediately").
    pub confirmation_wait_secs: u32,
}

impl Default for ExecutionBehavior {
    fn default() -> Self {
        Self {
            dry_run: false,
            signing_impl: SignerImpl::Software,
            confirmation_wait_secs: 0,
        }
    }
}

/// A composable behavior option; each one mutates a single field of the
/// behavior configuration.
pub type BehaviorOption = Box<dyn FnOnce(&mut ExecutionBehavior)>;

/// Skip all network interaction, validating signing logic only.
pub fn dry_run() -> BehaviorOption {
    Box::new(|behavior| behavior.dry_run = true)
}

/// Select the signing implementation explicitly.
pub fn signing_impl(value: SignerImpl) -> BehaviorOption {
    Box::new(move |behavior| behavior.signing_impl = value)
}

/// Poll for a receipt for up to `seconds` after a successful broadcast.
pub fn confirmation_wait(seconds: u32) -> BehaviorOption {
    Box::new(move |behavior| behavior.confirmation_wait_secs = seconds)
}

/// Result state accumulated across the pipeline stages. Each field is
/// written at most once per execution.
#[derive(Debug, Clone, Default)]
pub(crate) struct ExecutionState {
    pub(crate) execution_error: Option<TransactionError>,
    pub(crate) result_error: Option<TransactionError>,
    pub(crate) broadcast_result: Option<BroadcastResult>,
    pub(crate) receipt: Option<TransactionReceipt>,
    pub(crate) confirmation: ConfirmationState,
}

/// Drives the transaction signing and submission process.
pub struct TransactionController<P, K, H>
where
    P: NetworkProvider,
    K: KeyStore,
    H: HardwareWallet,
{
    provider: P,
    signer: SigningStrategy<K, H>,
    tx: Transaction,
    behavior: ExecutionBehavior,
    pub(crate) state: ExecutionState,
}

impl<P, K, H> TransactionController<P, K, H>
where
    P: NetworkProvider,
    K: KeyStore,
    H: HardwareWallet,
{
    /// Initializes a controller for one transaction.
    ///
    /// The signing implementation defaults to whatever the identity implies;
    /// options may override it, but an override that disagrees with the
    /// identity is rejected as a bad parameter before anything runs.
    pub fn new(
        provider: P,
        identity: SignerIdentity<K, H>,
        tx: Transaction,
        options: impl IntoIterator<Item = BehaviorOption>,
    ) -> Result<Self, TransactionError> {
        let mut behavior = ExecutionBehavior {
            signing_impl: identity.signing_impl(),
            ..Default::default()
        };
        for option in options {
            option(&mut behavior);
        }

        let signer = select_strategy(behavior.signing_impl, identity)?;

        Ok(Self {
            provider,
            signer,
            tx,
            behavior,
            state: ExecutionState::default(),
        })
    }

    /// Single entrypoint: runs sign → broadcast → confirm and returns the
    /// first fatal error, if any. Results are inspected afterwards through
    /// the accessors.
    pub async fn execute(&mut self) -> Result<(), TransactionError> {
        let state = ExecutionState::default();
        let state = self.sign_for_sending(state).await;
        let state = self.send_signed(state).await;
        let state = self.await_confirmation(state).await;
        self.state = state;

        match &self.state.execution_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Hex transaction hash: SHA-256 over the canonical payload bytes.
    ///
    /// Stable across signing, so it can be computed before or after
    /// execution; used to key confirmation polling and as the caller-facing
    /// transaction id.
    pub fn transaction_hash(&self) -> Result<String, TransactionError> {
        Ok(hex::encode(self.tx.digest()?))
    }

    pub(crate) async fn sign_for_sending(&mut self, mut state: ExecutionState) -> ExecutionState {
        if state.execution_error.is_some() {
            return state;
        }

        if let Err(err) = self.signer.sign(&mut self.tx).await {
            state.execution_error = Some(err.into());
        }
        state
    }

    pub(crate) async fn send_signed(&mut self, mut state: ExecutionState) -> ExecutionState {
        if state.execution_error.is_some() || self.behavior.dry_run {
            return state;
        }

        match self.provider.broadcast(&self.tx).await {
            Err(err) => {
                state.execution_error = Some(err.into());
            }
            Ok(ack) if !ack.is_success() => {
                state.execution_error = Some(TransactionError::BroadcastRejected {
                    code: ack.code,
                    message: ack.message_lossy(),
                });
            }
            Ok(ack) => {
                // Accepted into the pending pool; confirmation is separate.
                debug!("transaction accepted by network: {:?}", ack.code);
                state.broadcast_result = Some(ack);
            }
        }
        state
    }

    pub(crate) fn provider(&self) -> &P {
        &self.provider
    }

    /// The fatal pipeline error, if any. Valid after `execute` returns.
    pub fn execution_error(&self) -> Option<&TransactionError> {
        self.state.execution_error.as_ref()
    }

    /// The informational result error: set when the network accepted the
    /// transaction but its on-chain execution reported failure. Never blocks
    /// the pipeline.
    pub fn result_error(&self) -> Option<&TransactionError> {
        self.state.result_error.as_ref()
    }

    /// The raw broadcast acknowledgment, present once the network accepted
    /// the transaction.
    pub fn broadcast_result(&self) -> Option<&BroadcastResult> {
        self.state.broadcast_result.as_ref()
    }

    /// The execution receipt, present after a successful confirmation or as
    /// a synthesized empty value when confirmation was skipped.
    pub fn receipt(&self) -> Option<&TransactionReceipt> {
        self.state.receipt.as_ref()
    }

    pub fn confirmation_state(&self) -> ConfirmationState {
        self.state.confirmation
    }

    pub fn behavior(&self) -> &ExecutionBehavior {
        &self.behavior
    }

    pub fn transaction(&self) -> &Transaction {
        &self.tx
    }
}
