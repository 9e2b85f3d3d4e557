mod address;
pub use address::*;

mod transaction;
pub use transaction::*;

mod receipt;
pub use receipt::*;

mod error;
pub use error::*;
