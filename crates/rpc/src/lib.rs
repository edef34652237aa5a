//! JSON-RPC 2.0 plumbing for talking to Ethereum nodes.
//!
//! [`JsonRpcClient`] is the seam everything above this crate is written against; [`HttpClient`]
//! is the production implementation and tests substitute their own.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod block;
pub mod client;
pub mod error;
pub mod http;
pub mod request;
pub mod response;

pub use block::{BlockTag, parse_quantity};
pub use client::JsonRpcClient;
pub use error::{ErrorCode, RpcError, TransportError};
pub use http::{Auth, Gateway, HttpClient, HttpClientBuilder, REQUEST_TIMEOUT};
pub use request::{RpcMethodCall, Version};
pub use response::ResponseResult;
