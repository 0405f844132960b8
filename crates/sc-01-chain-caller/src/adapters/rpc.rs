//! # JSON-RPC Contract Caller
//!
//! Reads receipts from an external-chain node over Ethereum JSON-RPC
//! (`eth_getTransactionReceipt`, `eth_blockNumber`). Every request is bounded
//! by the configured timeout; any failure is logged and reported as "no
//! confirmed receipt".

use crate::config::RpcConfig;
use crate::domain::{CallerError, Log, Receipt};
use crate::ports::ContractCaller;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use shared_types::{decode_hex, parse_address, parse_hash, to_hex, Hash};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// JSON-RPC request structure.
#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a, T: Serialize> {
    jsonrpc: &'static str,
    method: &'a str,
    params: T,
    id: u64,
}

/// JSON-RPC response structure.
#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// Receipt as returned by `eth_getTransactionReceipt`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcReceipt {
    transaction_hash: String,
    block_number: Option<String>,
    status: Option<String>,
    #[serde(default)]
    logs: Vec<RpcLog>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcLog {
    address: String,
    topics: Vec<String>,
    data: String,
    log_index: String,
}

fn malformed(field: &str, err: impl std::fmt::Display) -> CallerError {
    CallerError::MalformedResponse(format!("{field}: {err}"))
}

/// Parse a hex quantity such as `0x1b4`.
pub fn parse_quantity(s: &str) -> Result<u64, CallerError> {
    let digits = s
        .strip_prefix("0x")
        .ok_or_else(|| malformed("quantity", s))?;
    u64::from_str_radix(digits, 16).map_err(|e| malformed("quantity", e))
}

impl TryFrom<RpcLog> for Log {
    type Error = CallerError;

    fn try_from(log: RpcLog) -> Result<Self, Self::Error> {
        Ok(Log {
            address: parse_address(&log.address).map_err(|e| malformed("address", e))?,
            topics: log
                .topics
                .iter()
                .map(|t| parse_hash(t).map_err(|e| malformed("topic", e)))
                .collect::<Result<_, _>>()?,
            data: decode_hex(&log.data).map_err(|e| malformed("data", e))?,
            log_index: parse_quantity(&log.log_index)?,
        })
    }
}

impl TryFrom<RpcReceipt> for Receipt {
    type Error = CallerError;

    fn try_from(receipt: RpcReceipt) -> Result<Self, Self::Error> {
        let block_number = receipt
            .block_number
            .as_deref()
            .ok_or_else(|| malformed("blockNumber", "pending receipt"))
            .and_then(parse_quantity)?;
        // Pre-Byzantium receipts carry no status field
        let status = match receipt.status.as_deref() {
            Some(s) => parse_quantity(s)? == 1,
            None => true,
        };
        Ok(Receipt {
            tx_hash: parse_hash(&receipt.transaction_hash)
                .map_err(|e| malformed("transactionHash", e))?,
            block_number,
            status,
            logs: receipt
                .logs
                .into_iter()
                .map(Log::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

/// A node answering with another transaction's receipt is faulty.
fn ensure_receipt_for(requested: &Hash, receipt: Receipt) -> Result<Receipt, CallerError> {
    if receipt.tx_hash != *requested {
        return Err(malformed(
            "transactionHash",
            format!(
                "requested {}, got {}",
                to_hex(requested),
                to_hex(&receipt.tx_hash)
            ),
        ));
    }
    Ok(receipt)
}

/// Whether a receipt mined at `receipt_block` is `required` blocks deep
/// under `head`.
pub fn has_confirmations(head: u64, receipt_block: u64, required: u64) -> bool {
    head.checked_sub(receipt_block)
        .is_some_and(|depth| depth >= required)
}

/// Contract caller backed by an external-chain JSON-RPC endpoint.
pub struct RpcContractCaller {
    http_client: reqwest::Client,
    config: RpcConfig,
    request_id: AtomicU64,
}

impl RpcContractCaller {
    /// Create a caller for the configured endpoint.
    pub fn new(config: RpcConfig) -> Result<Self, CallerError> {
        config.validate()?;
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| CallerError::Config(e.to_string()))?;

        Ok(Self {
            http_client,
            config,
            request_id: AtomicU64::new(1),
        })
    }

    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    /// Make a JSON-RPC call. `Ok(None)` is a `null` result.
    async fn call<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> Result<Option<R>, CallerError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id,
        };

        let send = async {
            let response = self
                .http_client
                .post(&self.config.url)
                .json(&request)
                .send()
                .await?
                .error_for_status()?;
            response.json::<JsonRpcResponse<R>>().await
        };

        let rpc_response = tokio::time::timeout(self.config.timeout(), send)
            .await
            .map_err(|_| CallerError::Timeout(self.config.timeout_ms))??;

        if let Some(error) = rpc_response.error {
            return Err(CallerError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        Ok(rpc_response.result)
    }

    /// `eth_blockNumber` - current head of the external chain.
    pub async fn block_number(&self) -> Result<u64, CallerError> {
        let result: Option<String> = self.call("eth_blockNumber", Vec::<()>::new()).await?;
        let head = result.ok_or_else(|| malformed("eth_blockNumber", "null result"))?;
        parse_quantity(&head)
    }

    /// `eth_getTransactionReceipt` - `None` when the node does not know the tx.
    pub async fn transaction_receipt(&self, tx_hash: Hash) -> Result<Option<Receipt>, CallerError> {
        let result: Option<RpcReceipt> = self
            .call("eth_getTransactionReceipt", [to_hex(&tx_hash)])
            .await?;
        result
            .map(|raw| Receipt::try_from(raw).and_then(|r| ensure_receipt_for(&tx_hash, r)))
            .transpose()
    }

    async fn fetch_confirmed(
        &self,
        tx_hash: Hash,
        required_confirmations: u64,
    ) -> Result<Option<Receipt>, CallerError> {
        let Some(receipt) = self.transaction_receipt(tx_hash).await? else {
            debug!(tx_hash = %to_hex(&tx_hash), "[sc-01] receipt not found");
            return Ok(None);
        };
        if !receipt.status {
            debug!(tx_hash = %to_hex(&tx_hash), "[sc-01] transaction reverted");
            return Ok(None);
        }

        let head = self.block_number().await?;
        if !has_confirmations(head, receipt.block_number, required_confirmations) {
            debug!(
                tx_hash = %to_hex(&tx_hash),
                head,
                receipt_block = receipt.block_number,
                required_confirmations,
                "[sc-01] receipt not yet confirmed"
            );
            return Ok(None);
        }
        Ok(Some(receipt))
    }
}

#[async_trait]
impl ContractCaller for RpcContractCaller {
    async fn get_confirmed_tx_receipt(
        &self,
        tx_hash: Hash,
        required_confirmations: u64,
    ) -> Option<Receipt> {
        match self.fetch_confirmed(tx_hash, required_confirmations).await {
            Ok(receipt) => receipt,
            Err(e) => {
                warn!(
                    tx_hash = %to_hex(&tx_hash),
                    url = %self.config.url,
                    error = %e,
                    "[sc-01] failed to fetch receipt"
                );
                None
            }
        }
    }
}
