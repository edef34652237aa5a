//! Address parsing and formatting with [EIP-55](https://eips.ethereum.org/EIPS/eip-55) checksums.

use alloy_primitives::{Address, hex};

/// Errors that can occur when validating a user or contract supplied address.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// Not 40 hex characters, with an optional `0x`/`0X` prefix.
    #[error("invalid address `{0}`: expected 40 hex characters")]
    NotHex(String),
    /// Mixed-case input whose casing does not match its checksum.
    #[error("invalid address checksum for `{input}`, expected `{expected}`")]
    Checksum {
        /// The rejected input.
        input: String,
        /// The correctly checksummed rendering.
        expected: String,
    },
}

/// The textual style used by [`format_address`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AddressFormat {
    /// `0x`-prefixed, mixed-case EIP-55 checksum.
    #[default]
    Checksum,
    /// `0x`-prefixed, all lowercase.
    Lowercase,
    /// `0X`-prefixed, all uppercase.
    Uppercase,
}

/// Parses a 20-byte address, validating its checksum if the input is mixed-case.
///
/// All-lowercase and all-uppercase inputs carry no checksum and are accepted as long as they are
/// well-formed hex.
pub fn parse_address(input: &str) -> Result<Address, AddressError> {
    let body =
        input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")).unwrap_or(input);
    if body.len() != 40 || !body.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(AddressError::NotHex(input.to_string()));
    }
    let bytes = hex::decode(body).map_err(|_| AddressError::NotHex(input.to_string()))?;
    let address = Address::from_slice(&bytes);

    let has_lower = body.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = body.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        let expected = address.to_checksum(None);
        if expected[2..] != *body {
            return Err(AddressError::Checksum { input: input.to_string(), expected });
        }
    }
    Ok(address)
}

/// Renders an address in the given style.
pub fn format_address(address: &Address, format: AddressFormat) -> String {
    match format {
        AddressFormat::Checksum => address.to_checksum(None),
        AddressFormat::Lowercase => format!("0x{}", hex::encode(address)),
        AddressFormat::Uppercase => format!("0X{}", hex::encode_upper(address)),
    }
}
