//! End-to-end pipeline tests with a real key store and a stubbed network.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use txpilot::models::{
    Address, BroadcastResult, ContractCall, ResponseCode, Transaction, TransactionError,
    TransactionPayload, TransactionReceipt,
};
use txpilot::services::keystore::LocalKeyStore;
use txpilot::services::ledger::LedgerBridge;
use txpilot::services::provider::{NetworkProvider, ProviderError};
use txpilot::utils::recover_address;
use txpilot::{
    confirmation_wait, dry_run, ConfirmationState, SignerIdentity, TransactionController,
};

const PASSPHRASE: &str = "opensesame";

#[derive(Default)]
struct CallCounters {
    broadcasts: AtomicUsize,
    receipt_lookups: AtomicUsize,
}

/// Network stub: a fixed broadcast acknowledgment plus a scripted sequence
/// of receipt lookups.
struct StubProvider {
    ack: BroadcastResult,
    receipts: Mutex<VecDeque<Result<TransactionReceipt, ProviderError>>>,
    counters: Arc<CallCounters>,
}

impl StubProvider {
    fn accepting(receipts: Vec<Result<TransactionReceipt, ProviderError>>) -> Self {
        Self {
            ack: BroadcastResult {
                code: ResponseCode::Success,
                message: Vec::new(),
            },
            receipts: Mutex::new(receipts.into()),
            counters: Arc::new(CallCounters::default()),
        }
    }

    fn rejecting(message: &str) -> Self {
        Self {
            ack: BroadcastResult {
                code: ResponseCode::ContractValidateError,
                message: message.as_bytes().to_vec(),
            },
            receipts: Mutex::new(VecDeque::new()),
            counters: Arc::new(CallCounters::default()),
        }
    }

    fn counters(&self) -> Arc<CallCounters> {
        self.counters.clone()
    }
}

#[async_trait]
impl NetworkProvider for StubProvider {
    async fn broadcast(&self, _tx: &Transaction) -> Result<BroadcastResult, ProviderError> {
        self.counters.broadcasts.fetch_add(1, Ordering::SeqCst);
        Ok(self.ack.clone())
    }

    async fn get_transaction_receipt(
        &self,
        _tx_id: &str,
    ) -> Result<TransactionReceipt, ProviderError> {
        self.counters.receipt_lookups.fetch_add(1, Ordering::SeqCst);
        self.receipts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ProviderError::NotFound))
    }
}

fn raw_key() -> Vec<u8> {
    hex::decode("4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318").unwrap()
}

fn unlocked_keystore() -> (Arc<LocalKeyStore>, Address) {
    let keystore = LocalKeyStore::new();
    let account = keystore.import_key(&raw_key(), PASSPHRASE).unwrap();
    keystore.unlock(&account, PASSPHRASE).unwrap();
    (Arc::new(keystore), account)
}

fn transfer(owner: Address) -> Transaction {
    Transaction::new(TransactionPayload {
        ref_block_hash: [0x3c; 8],
        expiration_ms: 1_700_000_060_000,
        timestamp_ms: 1_700_000_000_000,
        fee_limit: 10_000_000,
        contract: ContractCall {
            owner,
            to: owner,
            amount: 25_000,
            data: Vec::new(),
        },
    })
}

type Controller = TransactionController<StubProvider, LocalKeyStore, LedgerBridge>;

#[tokio::test(start_paused = true)]
async fn confirmed_transfer_round_trip() {
    let (keystore, account) = unlocked_keystore();
    let provider = StubProvider::accepting(vec![
        Err(ProviderError::NotFound),
        Ok(TransactionReceipt {
            block_number: 901,
            ..Default::default()
        }),
    ]);
    let counters = provider.counters();

    let mut controller: Controller = TransactionController::new(
        provider,
        SignerIdentity::software(keystore, account),
        transfer(account),
        vec![confirmation_wait(5)],
    )
    .unwrap();

    let hash_before = controller.transaction_hash().unwrap();
    controller.execute().await.unwrap();

    assert_eq!(controller.transaction_hash().unwrap(), hash_before);
    assert_eq!(controller.confirmation_state(), ConfirmationState::Confirmed);
    assert_eq!(controller.receipt().map(|r| r.block_number), Some(901));
    assert!(controller.result_error().is_none());
    assert_eq!(counters.broadcasts.load(Ordering::SeqCst), 1);
    assert_eq!(counters.receipt_lookups.load(Ordering::SeqCst), 2);

    // The attached signature recovers to the signing account.
    let tx = controller.transaction();
    assert_eq!(tx.signatures.len(), 1);
    let digest = tx.digest().unwrap();
    assert_eq!(recover_address(&digest, &tx.signatures[0]).unwrap(), account);
}

#[tokio::test]
async fn locked_account_never_touches_network() {
    let keystore = LocalKeyStore::new();
    let account = keystore.import_key(&raw_key(), PASSPHRASE).unwrap();
    let provider = StubProvider::accepting(vec![]);
    let counters = provider.counters();

    let mut controller: Controller = TransactionController::new(
        provider,
        SignerIdentity::software(Arc::new(keystore), account),
        transfer(account),
        vec![confirmation_wait(5)],
    )
    .unwrap();

    let result = controller.execute().await;

    assert!(matches!(result, Err(TransactionError::Signer(_))));
    assert_eq!(counters.broadcasts.load(Ordering::SeqCst), 0);
    assert_eq!(counters.receipt_lookups.load(Ordering::SeqCst), 0);
    assert!(controller.receipt().is_none());
}

#[tokio::test]
async fn dry_run_signs_but_stays_offline() {
    let (keystore, account) = unlocked_keystore();
    let provider = StubProvider::accepting(vec![]);
    let counters = provider.counters();

    let mut controller: Controller = TransactionController::new(
        provider,
        SignerIdentity::software(keystore, account),
        transfer(account),
        vec![dry_run(), confirmation_wait(30)],
    )
    .unwrap();

    controller.execute().await.unwrap();

    assert!(controller.transaction().is_signed());
    assert_eq!(controller.receipt(), Some(&TransactionReceipt::default()));
    assert_eq!(counters.broadcasts.load(Ordering::SeqCst), 0);
    assert_eq!(counters.receipt_lookups.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn broadcast_rejection_reports_network_message() {
    let (keystore, account) = unlocked_keystore();
    let provider = StubProvider::rejecting("contract validate error: balance is not sufficient");
    let counters = provider.counters();

    let mut controller: Controller = TransactionController::new(
        provider,
        SignerIdentity::software(keystore, account),
        transfer(account),
        vec![confirmation_wait(5)],
    )
    .unwrap();

    let err = controller.execute().await.unwrap_err();

    assert!(err.to_string().contains("balance is not sufficient"));
    assert!(controller.broadcast_result().is_none());
    assert_eq!(counters.receipt_lookups.load(Ordering::SeqCst), 0);
}
