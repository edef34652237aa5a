//! Arbitrary-alphabet big-integer encodings.
//!
//! The input is treated as one big-endian unsigned integer and rewritten in the radix of the
//! alphabet. Leading zero bytes are preserved as leading copies of the alphabet's first symbol,
//! the same convention Bitcoin's base58 uses.

use sha2::{Digest, Sha256};

/// Base36 with an uppercase alphabet, as used by the `k` multibase prefix (after lowercasing).
pub const BASE36: BaseN = BaseN::new(b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ");

/// Bitcoin base58.
pub const BASE58: BaseN =
    BaseN::new(b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz");

/// A big-integer encoding over a fixed alphabet.
#[derive(Clone, Copy, Debug)]
pub struct BaseN {
    alphabet: &'static [u8],
}

impl BaseN {
    /// Creates a codec for the given alphabet. The radix is the alphabet's length.
    pub const fn new(alphabet: &'static [u8]) -> Self {
        assert!(alphabet.len() >= 2 && alphabet.len() <= 256);
        Self { alphabet }
    }

    /// The radix of this encoding.
    pub const fn radix(&self) -> usize {
        self.alphabet.len()
    }

    /// Encodes `bytes`.
    pub fn encode(&self, bytes: &[u8]) -> String {
        let radix = self.radix() as u32;
        let zeros = bytes.iter().take_while(|&&b| b == 0).count();

        // little-endian digits in `radix`
        let mut digits: Vec<u8> = Vec::with_capacity(bytes.len() * 2);
        for &byte in &bytes[zeros..] {
            let mut carry = u32::from(byte);
            for digit in &mut digits {
                carry += u32::from(*digit) << 8;
                *digit = (carry % radix) as u8;
                carry /= radix;
            }
            while carry > 0 {
                digits.push((carry % radix) as u8);
                carry /= radix;
            }
        }

        let first = self.alphabet[0] as char;
        std::iter::repeat_n(first, zeros)
            .chain(digits.iter().rev().map(|&d| self.alphabet[d as usize] as char))
            .collect()
    }

    /// Decodes `input`, returning `None` if it contains a symbol outside the alphabet.
    pub fn decode(&self, input: &str) -> Option<Vec<u8>> {
        let radix = self.radix() as u32;
        let first = self.alphabet[0];
        let zeros = input.bytes().take_while(|&c| c == first).count();

        // little-endian bytes
        let mut bytes: Vec<u8> = Vec::with_capacity(input.len());
        for c in input.bytes().skip(zeros) {
            let mut carry = self.alphabet.iter().position(|&a| a == c)? as u32;
            for byte in &mut bytes {
                carry += u32::from(*byte) * radix;
                *byte = carry as u8;
                carry >>= 8;
            }
            while carry > 0 {
                bytes.push(carry as u8);
                carry >>= 8;
            }
        }

        let mut out = vec![0u8; zeros];
        out.extend(bytes.iter().rev());
        Some(out)
    }

    /// Encodes `bytes` followed by a 4-byte double SHA-256 checksum.
    pub fn encode_check(&self, bytes: &[u8]) -> String {
        let mut payload = bytes.to_vec();
        payload.extend_from_slice(&checksum(bytes));
        self.encode(&payload)
    }

    /// Decodes and verifies a checksummed payload, returning it without the checksum.
    pub fn decode_check(&self, input: &str) -> Option<Vec<u8>> {
        let mut payload = self.decode(input)?;
        if payload.len() < 4 {
            return None;
        }
        let expected = payload.split_off(payload.len() - 4);
        (checksum(&payload)[..] == expected[..]).then_some(payload)
    }
}

fn checksum(bytes: &[u8]) -> [u8; 4] {
    let digest = Sha256::digest(Sha256::digest(bytes));
    [digest[0], digest[1], digest[2], digest[3]]
}
