use super::Contract;
use crate::{constants, error::ContractError};
use alloy_primitives::{Address, B256};
use ens_primitives::{AbiDecoder, abi::encode_fixed_bytes};
use ens_rpc::JsonRpcClient;
use std::sync::Arc;

/// The ENS registry, which maps a node to the resolver responsible for it.
#[derive(Clone, Debug)]
pub struct Registry {
    contract: Contract,
}

impl Registry {
    pub fn new(client: Arc<dyn JsonRpcClient>, address: Address) -> Self {
        Self { contract: Contract::new(client, address) }
    }

    pub fn address(&self) -> Address {
        self.contract.address()
    }

    /// Returns the resolver of `node`, or `None` if none is set.
    pub async fn resolver(&self, node: B256) -> Result<Option<Address>, ContractError> {
        let frame =
            self.contract.frame(constants::RESOLVER).arg(encode_fixed_bytes(node.as_slice())?);
        let result = self.contract.call(&frame).await?;
        Ok(AbiDecoder::new(&result).address(0).map(|(addr, _)| addr).filter(|addr| !addr.is_zero()))
    }
}
