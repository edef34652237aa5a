//! In-memory stand-ins for the node and the off-chain services.

use alloy_primitives::{Address, Bytes, U256, address, hex};
use async_trait::async_trait;
use ens_primitives::{
    Selector,
    abi::{encode_address, encode_dynamic_bytes, encode_string, encode_uint},
};
use ens_resolver::{ContentFetcher, FetchError, HttpFetcher, NftPlatform};
use ens_rpc::{ErrorCode, JsonRpcClient, ResponseResult, RpcError, TransportError, parse_quantity};
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use url::Url;

pub const RESOLVER: Address = address!("4976fb03c32e5b8cfe2b6ccb31c09ba78ebaba41");
pub const OWNER: Address = address!("d8da6bf26964af9d7eed9e03e53415d37aa96045");
pub const TOKEN: Address = address!("bc4ca0eda7647a8ab7c2061c2e118a18a936f13d");

/// A recorded request.
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    pub method: String,
    pub params: Value,
}

impl Request {
    /// The `to` and selector of an `eth_call`.
    pub fn call_target(&self) -> Option<(Address, Selector)> {
        let call = self.params.get(0)?;
        let to = call.get("to")?.as_str()?.parse().ok()?;
        let data = call.get("data")?.as_str()?;
        let selector = hex::decode(data.get(2..10)?).ok()?;
        Some((to, Selector::from_slice(&selector)))
    }

    /// The call data of an `eth_call`.
    pub fn call_data(&self) -> Option<&str> {
        self.params.get(0)?.get("data")?.as_str()
    }
}

/// A node that answers from fixed tables and records every request.
///
/// Unknown calls return `0x`, like calling an address without code.
#[derive(Debug, Default)]
pub struct MockClient {
    requests: Mutex<Vec<Request>>,
    calls: HashMap<(Address, Selector), ResponseResult>,
    logs: Option<Value>,
    blocks: HashMap<u64, Value>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers calls of `selector` on `to` with `result`.
    pub fn on_call(mut self, to: Address, selector: Selector, result: impl Into<String>) -> Self {
        self.calls.insert((to, selector), ResponseResult::Success(Value::String(result.into())));
        self
    }

    /// Answers calls of `selector` on `to` with a revert.
    pub fn on_call_revert(mut self, to: Address, selector: Selector) -> Self {
        let err = RpcError::execution_reverted("execution reverted");
        self.calls.insert((to, selector), ResponseResult::Error(err));
        self
    }

    /// Answers `eth_getLogs` with `logs`.
    pub fn on_logs(mut self, logs: Value) -> Self {
        self.logs = Some(logs);
        self
    }

    /// Serves block `number` with `timestamp`.
    pub fn on_block(mut self, number: u64, timestamp: u64) -> Self {
        self.blocks.insert(
            number,
            json!({ "number": format!("{number:#x}"), "timestamp": format!("{timestamp:#x}") }),
        );
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    /// The `(to, selector)` of every `eth_call` so far.
    pub fn call_targets(&self) -> Vec<(Address, Selector)> {
        self.requests().iter().filter_map(Request::call_target).collect()
    }
}

#[async_trait]
impl JsonRpcClient for MockClient {
    async fn request(&self, method: &str, params: Value) -> Result<ResponseResult, TransportError> {
        let request = Request { method: method.to_string(), params };
        self.requests.lock().unwrap().push(request.clone());

        let response = match method {
            "eth_call" => {
                let target = request.call_target().expect("malformed eth_call");
                self.calls
                    .get(&target)
                    .cloned()
                    .unwrap_or_else(|| ResponseResult::Success(json!("0x")))
            }
            "eth_getLogs" => {
                ResponseResult::Success(self.logs.clone().unwrap_or_else(|| json!([])))
            }
            "eth_getBlockByNumber" => {
                let number =
                    request.params[0].as_str().and_then(parse_quantity).expect("block tag");
                ResponseResult::Success(self.blocks.get(&number).cloned().unwrap_or(Value::Null))
            }
            _ => ResponseResult::Error(RpcError::new(ErrorCode::MethodNotFound)),
        };
        Ok(response)
    }
}

/// Serves fixed bodies by URL.
#[derive(Debug, Default)]
pub struct MockHttp {
    bodies: HashMap<String, Bytes>,
    requests: Mutex<Vec<String>>,
}

impl MockHttp {
    pub fn with(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.bodies.insert(url.to_string(), body.into().into());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpFetcher for MockHttp {
    async fn get(&self, url: &Url, _headers: &[(&str, &str)]) -> Result<Option<Bytes>, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        Ok(self.bodies.get(url.as_str()).cloned())
    }
}

#[async_trait]
impl ContentFetcher for MockHttp {
    async fn fetch(&self, url: &Url) -> Result<Option<Bytes>, FetchError> {
        self.get(url, &[]).await
    }
}

/// An NFT platform that knows a single image.
#[derive(Debug, Default)]
pub struct MockPlatform {
    image: Option<Url>,
    lookups: Mutex<Vec<(Address, U256)>>,
}

impl MockPlatform {
    pub fn with_image(image: &str) -> Self {
        Self { image: Some(Url::parse(image).unwrap()), ..Default::default() }
    }

    pub fn lookups(&self) -> Vec<(Address, U256)> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl NftPlatform for MockPlatform {
    async fn image_url(
        &self,
        contract: Address,
        token_id: U256,
    ) -> Result<Option<Url>, FetchError> {
        self.lookups.lock().unwrap().push((contract, token_id));
        Ok(self.image.clone())
    }
}

/// `0x` followed by `words`.
pub fn result(words: &[String]) -> String {
    format!("0x{}", words.concat())
}

/// An ABI encoded address result.
pub fn address_result(address: Address) -> String {
    result(&[encode_address(&address)])
}

/// An ABI encoded uint256 result.
pub fn uint_result(value: u64) -> String {
    result(&[encode_uint(U256::from(value))])
}

/// An ABI encoded `string` return value.
pub fn string_result(value: &str) -> String {
    result(&[encode_uint(U256::from(32)), encode_string(value)])
}

/// An ABI encoded `bytes` return value.
pub fn bytes_result(value: &[u8]) -> String {
    result(&[encode_uint(U256::from(32)), encode_dynamic_bytes(value)])
}
