use crate::error::{RpcError, TransportError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The payload of a JSON-RPC response: either a `result` or an `error` object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ResponseResult {
    #[serde(rename = "result")]
    Success(Value),
    #[serde(rename = "error")]
    Error(RpcError),
}

impl ResponseResult {
    pub fn success<S: Serialize>(content: S) -> Result<Self, TransportError> {
        Ok(Self::Success(serde_json::to_value(content)?))
    }

    pub fn error(error: RpcError) -> Self {
        Self::Error(error)
    }

    /// Converts into a plain `Result`.
    pub fn into_result(self) -> Result<Value, RpcError> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Error(err) => Err(err),
        }
    }

    /// Parses a response body.
    ///
    /// The `jsonrpc` member must be `"2.0"`. An `error` member takes precedence over `result`,
    /// and a `null` result is a valid success. A body with neither is invalid.
    pub fn from_slice(body: &[u8]) -> Result<Self, TransportError> {
        let value: Value = serde_json::from_slice(body)?;
        let mut response = match value {
            Value::Object(response) => response,
            other => {
                return Err(TransportError::InvalidResponse(format!(
                    "expected an object, got {other}"
                )));
            }
        };

        match response.get("jsonrpc") {
            Some(Value::String(version)) if version == "2.0" => {}
            other => {
                return Err(TransportError::InvalidResponse(format!(
                    "unsupported jsonrpc version {}",
                    other.map(Value::to_string).unwrap_or_else(|| "<missing>".to_string())
                )));
            }
        }

        match response.remove("error") {
            Some(Value::Null) | None => {}
            Some(error) => {
                let error = serde_json::from_value(error).map_err(|err| {
                    TransportError::InvalidResponse(format!("malformed error object: {err}"))
                })?;
                return Ok(Self::Error(error));
            }
        }

        response
            .remove("result")
            .map(Self::Success)
            .ok_or_else(|| TransportError::InvalidResponse("missing result and error".to_string()))
    }
}
