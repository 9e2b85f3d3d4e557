//! # txpilot
//!
//! Transaction execution controller for ledger networks: takes an unsigned
//! transaction, signs it with a software key store or an external hardware
//! wallet, broadcasts it and optionally polls the network for the execution
//! receipt within a bounded wait window.
//!
//! ## Architecture
//!
//! ```text
//! TransactionController (domain)
//!   ├── SigningStrategy        - Software (key store) / Hardware (wallet)
//!   ├── NetworkProvider        - broadcast + receipt lookup
//!   └── Confirmation polling   - bounded one-second cadence
//! ```
//!
//! One controller instance drives exactly one transaction through the
//! sign → broadcast → confirm pipeline; once a fatal error is recorded every
//! remaining stage becomes a no-op and the error is returned unchanged.

pub mod constants;
pub mod models;
pub mod services;
pub mod utils;

pub mod domain;

pub use domain::transaction::{
    confirmation_wait, dry_run, signing_impl, BehaviorOption, ConfirmationState,
    ExecutionBehavior, TransactionController,
};
pub use models::{
    Address, BroadcastResult, ResponseCode, Transaction, TransactionError, TransactionReceipt,
};
pub use services::signer::{SignerIdentity, SignerImpl};
