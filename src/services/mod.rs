//! # Services Module
//!
//! External collaborators of the execution pipeline: the network provider,
//! the software key store, the hardware wallet transport and the signing
//! strategy that dispatches between them.

pub mod keystore;
pub use keystore::*;

pub mod ledger;
pub use ledger::*;

pub mod provider;
pub use provider::*;

pub mod signer;
pub use signer::*;
