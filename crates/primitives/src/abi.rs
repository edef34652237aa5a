//! A minimal ABI codec over hex strings.
//!
//! Only the handful of parameter shapes needed by ENS and token contracts are supported: `bool`,
//! `uint256`, `int256`, `address`, `bytes32`, and the dynamic `bytes`/`string`. Every value is
//! one or more 32-byte words rendered as 64 hex characters.
//!
//! Decoding never panics: a result that is too short, or a word that is not valid hex, yields
//! `None` so callers can treat truncated or error-shaped node responses as absent values.

use alloy_primitives::{Address, B256, Bytes, I256, U256, hex, keccak256};
use std::fmt;

pub use alloy_primitives::Selector;

/// Size of an ABI word in bytes.
pub const WORD: usize = 32;

/// Errors that can occur when encoding call arguments.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AbiError {
    /// A fixed bytes argument longer than one word.
    #[error("fixed bytes must be at most 32 bytes long, got {0}")]
    FixedBytesTooLong(usize),
}

/// Computes the 4-byte selector of a canonical function signature such as `addr(bytes32)`.
pub fn selector(signature: &str) -> Selector {
    Selector::from_slice(&keccak256(signature.as_bytes())[..4])
}

/// Encodes a `bool`.
pub fn encode_bool(value: bool) -> String {
    encode_uint(U256::from(value as u8))
}

/// Encodes an unsigned integer, left-padded with `0`.
pub fn encode_uint(value: U256) -> String {
    hex::encode(value.to_be_bytes::<32>())
}

/// Encodes a signed integer in two's complement, so negative values are left-padded with `f`.
pub fn encode_int(value: I256) -> String {
    encode_uint(value.into_raw())
}

/// Encodes an address, left-padded with 24 zero digits.
pub fn encode_address(address: &Address) -> String {
    format!("{:0>64}", hex::encode(address))
}

/// Encodes fixed bytes, right-padded to a full word.
pub fn encode_fixed_bytes(bytes: &[u8]) -> Result<String, AbiError> {
    if bytes.len() > WORD {
        return Err(AbiError::FixedBytesTooLong(bytes.len()));
    }
    Ok(format!("{:0<64}", hex::encode(bytes)))
}

/// Encodes dynamic `bytes`: a length word followed by the content, right-padded to a word
/// boundary.
pub fn encode_dynamic_bytes(bytes: &[u8]) -> String {
    let padded = padded_len(bytes.len()) * 2;
    format!("{}{:0<padded$}", encode_uint(U256::from(bytes.len())), hex::encode(bytes))
}

/// Encodes a UTF-8 `string` like [`encode_dynamic_bytes`].
pub fn encode_string(value: &str) -> String {
    encode_dynamic_bytes(value.as_bytes())
}

const fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD) * WORD
}

/// A contract call: target address, function selector and encoded arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallFrame {
    /// The contract being called.
    pub to: Address,
    /// The function selector.
    pub selector: Selector,
    params: String,
}

impl CallFrame {
    /// Starts a call to `selector` on `to` without arguments.
    pub fn new(to: Address, selector: Selector) -> Self {
        Self { to, selector, params: String::new() }
    }

    /// Appends an already encoded argument.
    pub fn arg(mut self, encoded: impl AsRef<str>) -> Self {
        self.params.push_str(encoded.as_ref());
        self
    }

    /// Returns the `0x`-prefixed call data.
    pub fn data(&self) -> String {
        format!("0x{}{}", hex::encode(self.selector), self.params)
    }
}

impl fmt::Display for CallFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.to, self.selector)
    }
}

/// Reads fields out of a hex encoded call result.
///
/// Offsets are byte offsets into the decoded data, and every read returns the offset just past
/// the value so sequential fields can be chained.
#[derive(Clone, Copy, Debug)]
pub struct AbiDecoder<'a> {
    data: &'a str,
}

impl<'a> AbiDecoder<'a> {
    /// Wraps a result string, with or without its `0x` prefix.
    pub fn new(result: &'a str) -> Self {
        Self { data: result.strip_prefix("0x").unwrap_or(result) }
    }

    /// Number of bytes in the result.
    pub fn len(&self) -> usize {
        self.data.len() / 2
    }

    /// Whether the result holds no data, e.g. `0x`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the hex digits of `len` bytes starting at byte `offset`.
    fn slice(&self, offset: usize, len: usize) -> Option<&'a str> {
        let start = offset.checked_mul(2)?;
        let end = start.checked_add(len.checked_mul(2)?)?;
        self.data.get(start..end)
    }

    /// Reads the raw word at `offset`.
    pub fn word(&self, offset: usize) -> Option<(B256, usize)> {
        let digits = self.slice(offset, WORD)?;
        let bytes = hex::decode(digits).ok()?;
        Some((B256::from_slice(&bytes), offset + WORD))
    }

    /// Reads a `bool`; any non-zero word is `true`.
    pub fn bool(&self, offset: usize) -> Option<(bool, usize)> {
        self.uint(offset).map(|(value, end)| (!value.is_zero(), end))
    }

    /// Reads a `uint256`.
    pub fn uint(&self, offset: usize) -> Option<(U256, usize)> {
        self.word(offset).map(|(word, end)| (U256::from_be_bytes(word.0), end))
    }

    /// Reads an `int256` in two's complement.
    pub fn int(&self, offset: usize) -> Option<(I256, usize)> {
        self.uint(offset).map(|(raw, end)| (I256::from_raw(raw), end))
    }

    /// Reads an `address` from the low 20 bytes of a word.
    pub fn address(&self, offset: usize) -> Option<(Address, usize)> {
        self.word(offset).map(|(word, end)| (Address::from_word(word), end))
    }

    /// Reads a `bytes32`.
    pub fn fixed_bytes(&self, offset: usize) -> Option<(B256, usize)> {
        self.word(offset)
    }

    /// Reads dynamic `bytes` whose length word starts at `at`.
    ///
    /// The returned end offset accounts for the padding of the content to a word boundary.
    pub fn dynamic_bytes(&self, at: usize) -> Option<(Bytes, usize)> {
        let (len, start) = self.uint(at)?;
        let len = usize::try_from(u64::try_from(len).ok()?).ok()?;
        let content = hex::decode(self.slice(start, len)?).ok()?;
        Some((content.into(), start.checked_add(padded_len(len))?))
    }

    /// Reads a UTF-8 `string` whose length word starts at `at`.
    pub fn string(&self, at: usize) -> Option<(String, usize)> {
        let (bytes, end) = self.dynamic_bytes(at)?;
        String::from_utf8(bytes.into()).ok().map(|s| (s, end))
    }

    /// Reads a dynamic `bytes` value from the tail of the result: the word at `offset` holds the
    /// byte offset of its length word.
    ///
    /// Returns the value and the offset just past the head word.
    pub fn tail_bytes(&self, offset: usize) -> Option<(Bytes, usize)> {
        let (at, end) = self.uint(offset)?;
        let at = usize::try_from(u64::try_from(at).ok()?).ok()?;
        self.dynamic_bytes(at).map(|(bytes, _)| (bytes, end))
    }

    /// Reads a `string` from the tail of the result, see [`Self::tail_bytes`].
    pub fn tail_string(&self, offset: usize) -> Option<(String, usize)> {
        let (bytes, end) = self.tail_bytes(offset)?;
        String::from_utf8(bytes.into()).ok().map(|s| (s, end))
    }
}
