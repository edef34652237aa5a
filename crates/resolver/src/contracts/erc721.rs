use super::Contract;
use crate::{constants, error::ContractError};
use alloy_primitives::{Address, U256};
use ens_primitives::{AbiDecoder, abi::encode_uint};
use ens_rpc::JsonRpcClient;
use std::sync::Arc;

/// An [ERC-721](https://eips.ethereum.org/EIPS/eip-721) token contract.
#[derive(Clone, Debug)]
pub struct Erc721 {
    contract: Contract,
}

impl Erc721 {
    pub fn new(client: Arc<dyn JsonRpcClient>, address: Address) -> Self {
        Self { contract: Contract::new(client, address) }
    }

    pub fn address(&self) -> Address {
        self.contract.address()
    }

    /// `ownerOf(uint256)`
    pub async fn owner_of(&self, token_id: U256) -> Result<Option<Address>, ContractError> {
        let frame = self.contract.frame(constants::OWNER_OF).arg(encode_uint(token_id));
        let result = self.contract.call(&frame).await?;
        Ok(AbiDecoder::new(&result).address(0).map(|(owner, _)| owner))
    }

    /// `tokenURI(uint256)`, or `None` if empty.
    pub async fn token_uri(&self, token_id: U256) -> Result<Option<String>, ContractError> {
        let frame = self.contract.frame(constants::TOKEN_URI).arg(encode_uint(token_id));
        let result = self.contract.call(&frame).await?;
        Ok(AbiDecoder::new(&result).tail_string(0).map(|(uri, _)| uri).filter(|u| !u.is_empty()))
    }
}
