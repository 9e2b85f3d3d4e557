mod signer;
pub use signer::*;

mod transaction;
pub use transaction::*;
