//! Confirmation tracking: after a successful broadcast the controller polls
//! the network for the execution receipt, once per second, until the receipt
//! shows up or the caller's wait budget runs out.

use log::{debug, info, warn};
use serde::Serialize;

use super::controller::{ExecutionState, TransactionController};
use crate::constants::CONFIRMATION_POLL_INTERVAL;
use crate::models::{TransactionError, TransactionReceipt};
use crate::services::keystore::KeyStore;
use crate::services::ledger::HardwareWallet;
use crate::services::provider::NetworkProvider;

/// Where the confirmation step ended up.
///
/// `Skipped` covers prior-error, dry-run and zero-wait executions; the two
/// latter cases also synthesize an empty receipt so callers relying on
/// "receipt present" checks need no special-casing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ConfirmationState {
    #[default]
    Idle,
    Polling,
    Confirmed,
    TimedOut,
    Skipped,
}

impl<P, K, H> TransactionController<P, K, H>
where
    P: NetworkProvider,
    K: KeyStore,
    H: HardwareWallet,
{
    pub(crate) async fn await_confirmation(&mut self, mut state: ExecutionState) -> ExecutionState {
        if state.execution_error.is_some() {
            state.confirmation = ConfirmationState::Skipped;
            return state;
        }
        if self.behavior().dry_run || self.behavior().confirmation_wait_secs == 0 {
            // The caller opted out of waiting; stub an empty receipt.
            state.confirmation = ConfirmationState::Skipped;
            state.receipt = Some(TransactionReceipt::default());
            return state;
        }

        let tx_id = match self.transaction_hash() {
            Ok(tx_id) => tx_id,
            Err(err) => {
                state.execution_error = Some(err);
                state.confirmation = ConfirmationState::Skipped;
                return state;
            }
        };

        let wait_secs = self.behavior().confirmation_wait_secs;
        state.confirmation = ConfirmationState::Polling;
        debug!("waiting up to {}s for confirmation of {}", wait_secs, tx_id);

        let mut remaining = i64::from(wait_secs);
        loop {
            if remaining < 0 {
                warn!("transaction {} unconfirmed after {}s", tx_id, wait_secs);
                state.execution_error = Some(TransactionError::ConfirmationTimeout(wait_secs));
                state.confirmation = ConfirmationState::TimedOut;
                return state;
            }

            match self.provider().get_transaction_receipt(&tx_id).await {
                Ok(receipt) => {
                    if !receipt.is_success() {
                        // Execution failed on chain, but the broadcast itself
                        // succeeded; surface it without halting.
                        state.result_error = Some(TransactionError::ExecutionFailed(
                            receipt.res_message_lossy(),
                        ));
                    }
                    info!(
                        "transaction {} confirmed in block {}",
                        tx_id, receipt.block_number
                    );
                    state.receipt = Some(receipt);
                    state.confirmation = ConfirmationState::Confirmed;
                    return state;
                }
                Err(err) => {
                    // Includes lookup failures: retried until the budget is
                    // exhausted.
                    debug!("receipt for {} not yet available: {}", tx_id, err);
                }
            }

            tokio::time::sleep(CONFIRMATION_POLL_INTERVAL).await;
            remaining -= 1;
        }
    }
}
