//! # Domain Module
//!
//! Core pipeline logic: the transaction execution controller and its
//! confirmation tracking.

pub mod transaction;
pub use transaction::*;
