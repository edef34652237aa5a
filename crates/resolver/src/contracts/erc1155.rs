use super::Contract;
use crate::{constants, error::ContractError};
use alloy_primitives::{Address, U256, hex};
use ens_primitives::{
    AbiDecoder,
    abi::{encode_address, encode_uint},
};
use ens_rpc::JsonRpcClient;
use std::sync::Arc;

/// An [ERC-1155](https://eips.ethereum.org/EIPS/eip-1155) multi-token contract.
#[derive(Clone, Debug)]
pub struct Erc1155 {
    contract: Contract,
}

impl Erc1155 {
    pub fn new(client: Arc<dyn JsonRpcClient>, address: Address) -> Self {
        Self { contract: Contract::new(client, address) }
    }

    pub fn address(&self) -> Address {
        self.contract.address()
    }

    /// `balanceOf(address,uint256)`. An undecodable result counts as a zero balance.
    pub async fn balance_of(&self, owner: Address, token_id: U256) -> Result<U256, ContractError> {
        let frame = self
            .contract
            .frame(constants::BALANCE_OF)
            .arg(encode_address(&owner))
            .arg(encode_uint(token_id));
        let result = self.contract.call(&frame).await?;
        Ok(AbiDecoder::new(&result).uint(0).map(|(balance, _)| balance).unwrap_or_default())
    }

    /// `uri(uint256)` with the `{id}` placeholder substituted, or `None` if empty.
    pub async fn uri(&self, token_id: U256) -> Result<Option<String>, ContractError> {
        let frame = self.contract.frame(constants::URI).arg(encode_uint(token_id));
        let result = self.contract.call(&frame).await?;
        Ok(AbiDecoder::new(&result)
            .tail_string(0)
            .map(|(uri, _)| substitute_id(&uri, token_id))
            .filter(|u| !u.is_empty()))
    }
}

/// Replaces `{id}` with the token id as 64 lowercase hex digits.
pub(crate) fn substitute_id(uri: &str, token_id: U256) -> String {
    uri.replace("{id}", &hex::encode(token_id.to_be_bytes::<32>()))
}
