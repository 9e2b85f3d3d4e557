//! HTTP implementation of the network provider, talking to a node's wallet
//! API over JSON.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{NetworkProvider, ProviderError};
use crate::constants::DEFAULT_PROVIDER_TIMEOUT_SECS;
use crate::models::{
    BroadcastResult, ResourceReceipt, ResponseCode, Transaction, TransactionReceipt,
};

/// Configuration for the HTTP network provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpProviderConfig {
    /// Base URL of the node's wallet API.
    pub url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_PROVIDER_TIMEOUT_SECS
}

impl HttpProviderConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

#[derive(Serialize)]
struct BroadcastRequest<'a> {
    /// Hex encoding of the fully serialized transaction, signatures included.
    transaction: &'a str,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct BroadcastResponse {
    code: i32,
    message: String,
}

#[derive(Serialize)]
struct ReceiptRequest<'a> {
    value: &'a str,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ReceiptResponse {
    /// Transaction hash; empty when the node does not know the transaction.
    id: String,
    block_number: u64,
    fee: u64,
    result: i32,
    res_message: String,
    receipt: ResourceReceiptResponse,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ResourceReceiptResponse {
    energy_usage: u64,
    energy_fee: u64,
    net_usage: u64,
    net_fee: u64,
}

/// Message fields arrive hex-encoded; nodes occasionally send them raw, so
/// fall back to the literal bytes.
fn decode_message(message: String) -> Vec<u8> {
    hex::decode(&message).unwrap_or_else(|_| message.into_bytes())
}

fn broadcast_result_from_response(response: BroadcastResponse) -> BroadcastResult {
    BroadcastResult {
        code: ResponseCode::from_wire(response.code),
        message: decode_message(response.message),
    }
}

fn receipt_from_response(response: ReceiptResponse) -> Result<TransactionReceipt, ProviderError> {
    if response.id.is_empty() {
        return Err(ProviderError::NotFound);
    }
    Ok(TransactionReceipt {
        block_number: response.block_number,
        fee: response.fee,
        result: response.result,
        res_message: decode_message(response.res_message),
        receipt: ResourceReceipt {
            energy_usage: response.receipt.energy_usage,
            energy_fee: response.receipt.energy_fee,
            net_usage: response.receipt.net_usage,
            net_fee: response.receipt.net_fee,
        },
    })
}

/// JSON-over-HTTP client for a node's wallet API.
#[derive(Clone)]
pub struct HttpProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProvider {
    pub fn new(config: HttpProviderConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ProviderError::TransportError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    async fn post_json<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, ProviderError>
    where
        Req: Serialize + Sync,
        Resp: serde::de::DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);
        let response = self.client.post(&url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::RequestError {
                error: response.text().await.unwrap_or_default(),
                status_code: status.as_u16(),
            });
        }

        response
            .json::<Resp>()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl NetworkProvider for HttpProvider {
    async fn broadcast(&self, tx: &Transaction) -> Result<BroadcastResult, ProviderError> {
        let encoded = bincode::serialize(tx)
            .map_err(|e| ProviderError::TransportError(format!("failed to encode transaction: {}", e)))?;
        let tx_hex = hex::encode(encoded);

        let response: BroadcastResponse = self
            .post_json(
                "wallet/broadcasttransaction",
                &BroadcastRequest {
                    transaction: &tx_hex,
                },
            )
            .await?;

        Ok(broadcast_result_from_response(response))
    }

    async fn get_transaction_receipt(
        &self,
        tx_id: &str,
    ) -> Result<TransactionReceipt, ProviderError> {
        let response: ReceiptResponse = self
            .post_json(
                "wallet/gettransactioninfobyid",
                &ReceiptRequest { value: tx_id },
            )
            .await?;

        receipt_from_response(response)
    }
}
