//! Primitive types and codecs for ENS name resolution.
//!
//! Everything in this crate is pure: hashing a name, validating and formatting addresses,
//! packing contract call arguments into ABI words, and the multiformat helpers (unsigned
//! varints and base-N encodings) needed to decode content hashes.

#![warn(missing_docs)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod abi;
pub mod address;
pub mod basen;
pub mod namehash;
pub mod varint;

pub use abi::{AbiDecoder, AbiError, CallFrame, Selector};
pub use address::{AddressError, AddressFormat, format_address, parse_address};
pub use basen::{BASE36, BASE58, BaseN};
pub use namehash::{labelhash, namehash, normalize_label};
pub use varint::VarIntError;

pub use alloy_primitives::{Address, B256, Bytes, I256, U256, hex, keccak256};
