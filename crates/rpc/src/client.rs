use crate::{error::TransportError, response::ResponseResult};
use async_trait::async_trait;
use serde_json::Value;
use std::{fmt, sync::Arc};

/// Sends JSON-RPC method calls to a node.
///
/// Implementations return [`ResponseResult::Error`] when the node answered with an `error`
/// object, and reserve [`TransportError`] for failures to get a well-formed answer at all.
#[async_trait]
pub trait JsonRpcClient: Send + Sync + fmt::Debug {
    /// Calls `method` with `params`, which must be an array, an object or `null`.
    async fn request(&self, method: &str, params: Value) -> Result<ResponseResult, TransportError>;
}

#[async_trait]
impl<T: JsonRpcClient + ?Sized> JsonRpcClient for Arc<T> {
    async fn request(&self, method: &str, params: Value) -> Result<ResponseResult, TransportError> {
        (**self).request(method, params).await
    }
}

#[async_trait]
impl<T: JsonRpcClient + ?Sized> JsonRpcClient for Box<T> {
    async fn request(&self, method: &str, params: Value) -> Result<ResponseResult, TransportError> {
        (**self).request(method, params).await
    }
}
