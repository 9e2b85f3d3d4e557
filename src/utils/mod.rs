mod hash;
pub use hash::*;

mod secp256k1;
pub use secp256k1::*;
