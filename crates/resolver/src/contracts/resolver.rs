use super::{Contract, Log};
use crate::{constants, error::ContractError};
use alloy_primitives::{Address, B256, Bytes, U256};
use ens_primitives::{
    AbiDecoder,
    abi::{encode_fixed_bytes, encode_string, encode_uint},
};
use ens_rpc::{BlockTag, JsonRpcClient};
use std::sync::Arc;

/// A resolver implementing the `PublicResolver` record accessors.
///
/// Accessors return `None` for unset records: the zero address, an empty string or empty bytes.
#[derive(Clone, Debug)]
pub struct PublicResolver {
    contract: Contract,
}

impl PublicResolver {
    pub fn new(client: Arc<dyn JsonRpcClient>, address: Address) -> Self {
        Self { contract: Contract::new(client, address) }
    }

    pub fn address(&self) -> Address {
        self.contract.address()
    }

    pub async fn supports_interface(&self, interface: [u8; 4]) -> Result<bool, ContractError> {
        self.contract.supports_interface(interface).await
    }

    /// `addr(bytes32)`
    pub async fn addr(&self, node: B256) -> Result<Option<Address>, ContractError> {
        let frame = self.contract.frame(constants::ADDR).arg(encode_fixed_bytes(node.as_slice())?);
        let result = self.contract.call(&frame).await?;
        Ok(AbiDecoder::new(&result).address(0).map(|(addr, _)| addr).filter(|addr| !addr.is_zero()))
    }

    /// `text(bytes32,string)`
    pub async fn text(&self, node: B256, key: &str) -> Result<Option<String>, ContractError> {
        // the key is the only dynamic argument, so its head is the offset past the two head words
        let frame = self
            .contract
            .frame(constants::TEXT)
            .arg(encode_fixed_bytes(node.as_slice())?)
            .arg(encode_uint(U256::from(64)))
            .arg(encode_string(key));
        let result = self.contract.call(&frame).await?;
        Ok(AbiDecoder::new(&result).tail_string(0).map(|(text, _)| text).filter(|t| !t.is_empty()))
    }

    /// `contenthash(bytes32)`, undecoded.
    pub async fn contenthash(&self, node: B256) -> Result<Option<Bytes>, ContractError> {
        let frame =
            self.contract.frame(constants::CONTENTHASH).arg(encode_fixed_bytes(node.as_slice())?);
        let result = self.contract.call(&frame).await?;
        Ok(AbiDecoder::new(&result).tail_bytes(0).map(|(hash, _)| hash).filter(|h| !h.is_empty()))
    }

    /// `AddrChanged(bytes32 indexed node, address a)` logs for `node`.
    pub async fn addr_changed_logs(
        &self,
        node: B256,
        from: BlockTag,
        to: BlockTag,
    ) -> Result<Vec<Log>, ContractError> {
        self.contract.logs(constants::ADDR_CHANGED, node, from, to).await
    }

    /// `ContenthashChanged(bytes32 indexed node, bytes hash)` logs for `node`.
    pub async fn contenthash_changed_logs(
        &self,
        node: B256,
        from: BlockTag,
        to: BlockTag,
    ) -> Result<Vec<Log>, ContractError> {
        self.contract.logs(constants::CONTENTHASH_CHANGED, node, from, to).await
    }
}
