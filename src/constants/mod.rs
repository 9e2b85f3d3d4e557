mod network;
pub use network::*;

mod transaction;
pub use transaction::*;
