//! Network acknowledgment and execution receipt models.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

/// Application-level result code carried by a broadcast acknowledgment.
///
/// `Success` means "accepted into the pending pool", not "executed"; every
/// other code is a rejection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TryFromPrimitive, IntoPrimitive,
)]
#[repr(i32)]
pub enum ResponseCode {
    Success = 0,
    SignatureError = 1,
    ContractValidateError = 2,
    ContractExecuteError = 3,
    BandwidthError = 4,
    DupTransaction = 5,
    TaposError = 6,
    TransactionTooBig = 7,
    TransactionExpired = 8,
    ServerBusy = 9,
    NoConnection = 10,
    NotEnoughEffectiveConnection = 11,
    OtherError = 20,
}

impl ResponseCode {
    /// Maps an arbitrary wire code onto the closed set; unknown codes are
    /// treated as `OtherError`.
    pub fn from_wire(code: i32) -> Self {
        Self::try_from(code).unwrap_or(Self::OtherError)
    }
}

/// The network's synchronous acknowledgment of a broadcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BroadcastResult {
    pub code: ResponseCode,
    #[serde(default)]
    pub message: Vec<u8>,
}

impl BroadcastResult {
    pub fn is_success(&self) -> bool {
        self.code == ResponseCode::Success
    }

    pub fn message_lossy(&self) -> String {
        String::from_utf8_lossy(&self.message).into_owned()
    }
}

/// Resource accounting attached to an execution receipt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceReceipt {
    pub energy_usage: u64,
    pub energy_fee: u64,
    pub net_usage: u64,
    pub net_fee: u64,
}

/// The network's record of a transaction's actual execution outcome,
/// fetched by transaction hash after broadcast.
///
/// `default()` is the synthesized empty receipt stored when confirmation is
/// skipped (dry run or zero wait window).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub block_number: u64,
    pub fee: u64,
    /// On-chain execution result; zero is success.
    pub result: i32,
    #[serde(default)]
    pub res_message: Vec<u8>,
    pub receipt: ResourceReceipt,
}

impl TransactionReceipt {
    pub fn is_success(&self) -> bool {
        self.result == 0
    }

    pub fn res_message_lossy(&self) -> String {
        String::from_utf8_lossy(&self.res_message).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_code_from_wire_known() {
        assert_eq!(ResponseCode::from_wire(0), ResponseCode::Success);
        assert_eq!(ResponseCode::from_wire(1), ResponseCode::SignatureError);
        assert_eq!(ResponseCode::from_wire(8), ResponseCode::TransactionExpired);
    }

    #[test]
    fn test_response_code_from_wire_unknown_maps_to_other() {
        assert_eq!(ResponseCode::from_wire(999), ResponseCode::OtherError);
        assert_eq!(ResponseCode::from_wire(-1), ResponseCode::OtherError);
    }

    #[test]
    fn test_response_code_round_trips_to_wire() {
        assert_eq!(i32::from(ResponseCode::TaposError), 6);
        assert_eq!(
            ResponseCode::from_wire(i32::from(ResponseCode::ServerBusy)),
            ResponseCode::ServerBusy
        );
    }

    #[test]
    fn test_broadcast_result_success() {
        let ack = BroadcastResult {
            code: ResponseCode::Success,
            message: Vec::new(),
        };
        assert!(ack.is_success());

        let rejected = BroadcastResult {
            code: ResponseCode::SignatureError,
            message: b"validate signature error".to_vec(),
        };
        assert!(!rejected.is_success());
        assert_eq!(rejected.message_lossy(), "validate signature error");
    }

    #[test]
    fn test_empty_receipt_is_successful_and_zeroed() {
        let receipt = TransactionReceipt::default();
        assert!(receipt.is_success());
        assert_eq!(receipt.block_number, 0);
        assert_eq!(receipt.fee, 0);
        assert_eq!(receipt.receipt, ResourceReceipt::default());
        assert!(receipt.res_message.is_empty());
    }
}
