//! JSON-over-HTTP client for the local hardware wallet bridge daemon.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{HardwareWallet, LedgerError};
use crate::constants::{DEFAULT_BRIDGE_ENDPOINT, DEFAULT_BRIDGE_TIMEOUT_SECS};

/// Configuration for the hardware wallet bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerBridgeConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_endpoint() -> String {
    DEFAULT_BRIDGE_ENDPOINT.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_BRIDGE_TIMEOUT_SECS
}

impl Default for LedgerBridgeConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

#[derive(Serialize)]
struct SignRequest<'a> {
    payload: &'a str,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct SignResponse {
    signature: String,
    error: String,
}

/// Hardware wallet reachable through a local bridge daemon that relays
/// signing requests to the device.
#[derive(Clone)]
pub struct LedgerBridge {
    client: reqwest::Client,
    endpoint: String,
}

impl LedgerBridge {
    pub fn new(config: LedgerBridgeConfig) -> Result<Self, LedgerError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| LedgerError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl HardwareWallet for LedgerBridge {
    async fn sign_raw(&self, raw: &[u8]) -> Result<Vec<u8>, LedgerError> {
        let url = format!("{}/sign", self.endpoint);
        let payload = hex::encode(raw);

        let response = self
            .client
            .post(&url)
            .json(&SignRequest { payload: &payload })
            .send()
            .await
            .map_err(|e| LedgerError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LedgerError::Transport(format!(
                "bridge returned HTTP {}",
                status.as_u16()
            )));
        }

        let body: SignResponse = response
            .json()
            .await
            .map_err(|e| LedgerError::MalformedResponse(e.to_string()))?;

        if !body.error.is_empty() {
            return Err(LedgerError::Rejected(body.error));
        }
        if body.signature.is_empty() {
            return Err(LedgerError::MalformedResponse(
                "response carries neither signature nor error".to_string(),
            ));
        }

        hex::decode(&body.signature).map_err(|e| LedgerError::MalformedResponse(e.to_string()))
    }
}
