//! JSON-RPC error bindings.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An `error` object returned by a node, e.g. when a contract call reverts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: ErrorCode,
    /// error message
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl RpcError {
    /// New [`RpcError`] with the given [`ErrorCode`] and its default message.
    pub fn new(code: ErrorCode) -> Self {
        Self { message: code.message().to_string(), code, data: None }
    }

    /// Creates an execution error, the code nodes use for reverted calls.
    pub fn execution_reverted<M: Into<String>>(message: M) -> Self {
        Self { code: ErrorCode::ExecutionError, message: message.into(), data: None }
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.code.message(), self.code.code(), self.message)
    }
}

impl std::error::Error for RpcError {}

/// Errors raised while exchanging a JSON-RPC message with a node.
///
/// A node answering with an `error` object is not a transport error, see
/// [`ResponseResult::Error`](crate::ResponseResult::Error).
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("server returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to (de)serialize JSON-RPC message: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid params: expected an array, an object or null, got {0}")]
    InvalidParams(String),
    #[error("invalid JSON-RPC response: {0}")]
    InvalidResponse(String),
    #[error("invalid header: {0:?}, expected `key:value`")]
    BadHeader(String),
    #[error("invalid RPC URL {url:?}: {source}")]
    InvalidUrl { url: String, source: url::ParseError },
    #[error("unsupported RPC URL scheme {0:?}, only http and https are supported")]
    UnsupportedScheme(String),
}

/// List of JSON-RPC error codes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    /// Server received Invalid JSON.
    ParseError,
    /// send invalid request object.
    InvalidRequest,
    /// method does not exist or valid
    MethodNotFound,
    /// invalid method parameter.
    InvalidParams,
    /// internal call error
    InternalError,
    /// Custom geth error code, <https://github.com/vapory-legacy/wiki/blob/master/JSON-RPC-Error-Codes-Improvement-Proposal.md>
    ExecutionError,
    /// Used for server specific errors.
    ServerError(i64),
}

impl ErrorCode {
    /// Returns the error code as `i64`
    pub fn code(&self) -> i64 {
        match *self {
            Self::ParseError => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::InternalError => -32603,
            Self::ExecutionError => 3,
            Self::ServerError(c) => c,
        }
    }

    /// Returns the message associated with the error
    pub const fn message(&self) -> &'static str {
        match *self {
            Self::ParseError => "Parse error",
            Self::InvalidRequest => "Invalid request",
            Self::MethodNotFound => "Method not found",
            Self::InvalidParams => "Invalid params",
            Self::InternalError => "Internal error",
            Self::ExecutionError => "Execution error",
            Self::ServerError(_) => "Server error",
        }
    }
}

impl Serialize for ErrorCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.code())
    }
}

impl<'a> Deserialize<'a> for ErrorCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'a>,
    {
        i64::deserialize(deserializer).map(Into::into)
    }
}

impl From<i64> for ErrorCode {
    fn from(code: i64) -> Self {
        match code {
            -32700 => Self::ParseError,
            -32600 => Self::InvalidRequest,
            -32601 => Self::MethodNotFound,
            -32602 => Self::InvalidParams,
            -32603 => Self::InternalError,
            3 => Self::ExecutionError,
            _ => Self::ServerError(code),
        }
    }
}
