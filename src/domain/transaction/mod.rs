//! # Transaction Execution
//!
//! The controller drives a single transaction through the
//! sign → broadcast → confirm pipeline, accumulating results along the way.

mod controller;
pub use controller::*;

mod status;
pub use status::*;
