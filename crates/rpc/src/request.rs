use crate::error::TransportError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The only supported JSON-RPC version.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Version {
    #[default]
    #[serde(rename = "2.0")]
    V2,
}

/// A JSON-RPC 2.0 method call.
///
/// `params` is omitted from the serialized message when it is `null`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RpcMethodCall<'a> {
    pub jsonrpc: Version,
    pub id: u64,
    pub method: &'a str,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub params: Value,
}

impl<'a> RpcMethodCall<'a> {
    /// Creates a call, rejecting `params` that are neither an array, an object nor `null`.
    pub fn new(id: u64, method: &'a str, params: Value) -> Result<Self, TransportError> {
        match params {
            Value::Array(_) | Value::Object(_) | Value::Null => {
                Ok(Self { jsonrpc: Version::V2, id, method, params })
            }
            other => Err(TransportError::InvalidParams(other.to_string())),
        }
    }
}
