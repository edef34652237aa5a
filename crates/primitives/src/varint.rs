//! [Unsigned varint](https://github.com/multiformats/unsigned-varint) codec.
//!
//! Only values that fit in [`MAX_BYTES`] bytes (28 bits) are supported, which is plenty for the
//! multicodec tags and digest lengths found in content hashes.

/// Maximum number of bytes a supported varint may occupy.
pub const MAX_BYTES: usize = 4;

/// Largest value that can be encoded.
pub const MAX_VALUE: u64 = (1 << (7 * MAX_BYTES)) - 1;

/// Errors returned by [`decode`] and [`encode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum VarIntError {
    /// The buffer ended before a terminating byte was found.
    #[error("varint is truncated")]
    Truncated,
    /// A continuation was followed by a zero byte.
    #[error("varint is not minimally encoded")]
    NotMinimal,
    /// The value does not fit in [`MAX_BYTES`] bytes.
    #[error("varint overflows {MAX_BYTES} bytes")]
    Overflow,
}

/// Decodes a varint starting at `offset`.
///
/// Returns the value and the offset of the first byte after it.
pub fn decode(bytes: &[u8], offset: usize) -> Result<(u64, usize), VarIntError> {
    let mut value = 0u64;
    for (i, &byte) in bytes.iter().enumerate().skip(offset).take(MAX_BYTES) {
        if byte == 0 && i > offset {
            return Err(VarIntError::NotMinimal);
        }
        value |= u64::from(byte & 0x7f) << (7 * (i - offset));
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    if bytes.len() >= offset.saturating_add(MAX_BYTES) {
        Err(VarIntError::Overflow)
    } else {
        Err(VarIntError::Truncated)
    }
}

/// Encodes `value` as a varint.
pub fn encode(mut value: u64) -> Result<Vec<u8>, VarIntError> {
    if value > MAX_VALUE {
        return Err(VarIntError::Overflow);
    }
    let mut out = Vec::with_capacity(MAX_BYTES);
    while value >= 0x80 {
        out.push((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
    Ok(out)
}
