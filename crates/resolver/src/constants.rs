//! Protocol constants: contract addresses, function selectors and event topics.

use alloy_primitives::{Address, B256, address, b256};
use ens_primitives::Selector;

/// The ENS registry, deployed at the same address on mainnet and the public testnets.
pub const ENS_REGISTRY: Address = address!("00000000000c2e074ec69a0dfb2997ba6c7d2e1e");

/// `resolver(bytes32)`
pub const RESOLVER: Selector = Selector::new([0x01, 0x78, 0xb8, 0xbf]);

/// `supportsInterface(bytes4)`
pub const SUPPORTS_INTERFACE: Selector = Selector::new([0x01, 0xff, 0xc9, 0xa7]);
/// `addr(bytes32)`
pub const ADDR: Selector = Selector::new([0x3b, 0x3b, 0x57, 0xde]);
/// `text(bytes32,string)`
pub const TEXT: Selector = Selector::new([0x59, 0xd1, 0xd4, 0x3c]);
/// `contenthash(bytes32)`
pub const CONTENTHASH: Selector = Selector::new([0xbc, 0x1c, 0x58, 0xd1]);

/// `ownerOf(uint256)`
pub const OWNER_OF: Selector = Selector::new([0x63, 0x52, 0x21, 0x1e]);
/// `tokenURI(uint256)`
pub const TOKEN_URI: Selector = Selector::new([0xc8, 0x7b, 0x56, 0xdd]);
/// `balanceOf(address,uint256)`
pub const BALANCE_OF: Selector = Selector::new([0x00, 0xfd, 0xd5, 0x8e]);
/// `uri(uint256)`
pub const URI: Selector = Selector::new([0x0e, 0x89, 0x34, 0x1c]);

/// `AddrChanged(bytes32,address)`
pub const ADDR_CHANGED: B256 =
    b256!("52d7d861f09ab3d26239d492e8968629f95e9e318cf0b73bfddc441522a15fd2");
/// `ContenthashChanged(bytes32,bytes)`
pub const CONTENTHASH_CHANGED: B256 =
    b256!("e379c1624ed7e714cc0937528a32359d69d5281337765313dba4e081b72d7578");
