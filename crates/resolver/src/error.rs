use ens_primitives::AbiError;
use ens_rpc::{RpcError, TransportError};
use serde_json::Value;

/// Errors raised by contract calls and log queries.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The node answered with an `error` object, e.g. because the call reverted.
    #[error("node returned an error: {0}")]
    Ethereum(RpcError),
    #[error("unexpected result for {method}: {result}")]
    UnexpectedResult { method: &'static str, result: Value },
    #[error(transparent)]
    Abi(#[from] AbiError),
}

impl ContractError {
    /// Whether this is an on-chain error rather than a transport or protocol failure.
    pub fn is_ethereum_error(&self) -> bool {
        matches!(self, Self::Ethereum(_))
    }
}

/// Errors raised while fetching off-chain resources.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("invalid URL {0:?}")]
    InvalidUrl(String),
    #[error("invalid value for header {0:?}")]
    InvalidHeader(String),
}

/// Errors raised while resolving a name.
#[derive(Debug, thiserror::Error)]
pub enum EnsError {
    #[error(transparent)]
    Contract(#[from] ContractError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl From<TransportError> for EnsError {
    fn from(err: TransportError) -> Self {
        Self::Contract(err.into())
    }
}
