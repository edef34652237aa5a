//! Thin bindings for the contracts involved in resolution.
//!
//! Every binding wraps a [`Contract`], which owns the target address and a handle to the node.
//! Calls are read-only `eth_call`s against the latest block.

use crate::error::ContractError;
use alloy_primitives::{Address, B256};
use ens_primitives::{
    AbiDecoder, AddressFormat, CallFrame, Selector, abi::encode_fixed_bytes, format_address,
};
use ens_rpc::{BlockTag, JsonRpcClient, ResponseResult, parse_quantity};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

mod erc1155;
mod erc721;
mod registry;
mod resolver;

pub use erc1155::Erc1155;
pub use erc721::Erc721;
pub use registry::Registry;
pub use resolver::PublicResolver;

/// A deployed contract reachable through a [`JsonRpcClient`].
#[derive(Clone, Debug)]
pub struct Contract {
    address: Address,
    client: Arc<dyn JsonRpcClient>,
}

impl Contract {
    pub fn new(client: Arc<dyn JsonRpcClient>, address: Address) -> Self {
        Self { address, client }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Starts a call to `selector` on this contract.
    pub fn frame(&self, selector: Selector) -> CallFrame {
        CallFrame::new(self.address, selector)
    }

    /// Executes `frame` with `eth_call` and returns the hex encoded result.
    pub async fn call(&self, frame: &CallFrame) -> Result<String, ContractError> {
        debug!(target: "ens::contract", call = %frame, "eth_call");
        let params = json!([
            { "to": format_address(&frame.to, AddressFormat::Lowercase), "data": frame.data() },
            BlockTag::Latest,
        ]);
        match self.client.request("eth_call", params).await? {
            ResponseResult::Success(Value::String(result)) => {
                trace!(target: "ens::contract", call = %frame, %result);
                Ok(result)
            }
            ResponseResult::Success(result) => {
                Err(ContractError::UnexpectedResult { method: "eth_call", result })
            }
            ResponseResult::Error(err) => {
                debug!(target: "ens::contract", call = %frame, %err, "call failed");
                Err(ContractError::Ethereum(err))
            }
        }
    }

    /// ERC-165 `supportsInterface(bytes4)`. A result that does not decode counts as unsupported.
    pub async fn supports_interface(&self, interface: [u8; 4]) -> Result<bool, ContractError> {
        let frame =
            self.frame(crate::constants::SUPPORTS_INTERFACE).arg(encode_fixed_bytes(&interface)?);
        let result = self.call(&frame).await?;
        Ok(AbiDecoder::new(&result).bool(0).is_some_and(|(supported, _)| supported))
    }

    /// Queries the logs emitted by this contract with `event` as first topic and `node` as second.
    pub async fn logs(
        &self,
        event: B256,
        node: B256,
        from: BlockTag,
        to: BlockTag,
    ) -> Result<Vec<Log>, ContractError> {
        let filter = json!({
            "address": format_address(&self.address, AddressFormat::Lowercase),
            "topics": [event, node],
            "fromBlock": from,
            "toBlock": to,
        });
        debug!(target: "ens::contract", address = %self.address, %event, %from, %to, "eth_getLogs");
        match self.client.request("eth_getLogs", json!([filter])).await? {
            ResponseResult::Success(result) => Vec::<Log>::deserialize(&result)
                .map_err(|_| ContractError::UnexpectedResult { method: "eth_getLogs", result }),
            ResponseResult::Error(err) => Err(ContractError::Ethereum(err)),
        }
    }
}

/// Fetches the timestamp of block `number`, or `None` if the node does not know the block.
pub async fn block_timestamp(
    client: &dyn JsonRpcClient,
    number: u64,
) -> Result<Option<u64>, ContractError> {
    let params = json!([BlockTag::Number(number), false]);
    match client.request("eth_getBlockByNumber", params).await? {
        ResponseResult::Success(Value::Null) => Ok(None),
        ResponseResult::Success(result) => {
            match result.get("timestamp").and_then(Value::as_str).and_then(parse_quantity) {
                Some(timestamp) => Ok(Some(timestamp)),
                None => {
                    Err(ContractError::UnexpectedResult { method: "eth_getBlockByNumber", result })
                }
            }
        }
        ResponseResult::Error(err) => Err(ContractError::Ethereum(err)),
    }
}

/// An emitted log as returned by `eth_getLogs`. Only the fields used here are kept.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub block_number: Option<String>,
    #[serde(default)]
    pub transaction_hash: Option<String>,
    #[serde(default)]
    pub log_index: Option<String>,
}

impl Log {
    /// The block number, if present and well-formed.
    pub fn block(&self) -> Option<u64> {
        self.block_number.as_deref().and_then(parse_quantity)
    }
}
