//! ENS name hashing.

use alloy_primitives::{B256, Keccak256, keccak256};
use std::borrow::Cow;

/// Returns the ENS namehash as specified in [EIP-137](https://eips.ethereum.org/EIPS/eip-137).
///
/// Labels are only ASCII case-folded (see [`normalize_label`]); full UTS-46 normalization is not
/// performed. Empty labels, as in `"foo..eth"` or a trailing dot, are skipped, so `""` and `"."`
/// both hash to [`B256::ZERO`].
pub fn namehash(name: &str) -> B256 {
    // Generate the node starting from the right.
    // This buffer is `[node @ [u8; 32], label_hash @ [u8; 32]]`.
    let mut buffer = [0u8; 64];
    for label in name.rsplit('.').filter(|label| !label.is_empty()) {
        // node = keccak256([node, keccak256(label)])
        let mut label_hasher = Keccak256::new();
        label_hasher.update(normalize_label(label).as_bytes());
        label_hasher.finalize_into(&mut buffer[32..]);

        let mut buffer_hasher = Keccak256::new();
        buffer_hasher.update(buffer.as_slice());
        buffer_hasher.finalize_into(&mut buffer[..32]);
    }
    B256::from_slice(&buffer[..32])
}

/// Returns the keccak256 hash of a single normalized label.
pub fn labelhash(label: &str) -> B256 {
    keccak256(normalize_label(label).as_bytes())
}

/// Case-folds a label.
///
/// NOTE: this only lowercases ASCII characters and is not an EIP-137 compliant normalization.
pub fn normalize_label(label: &str) -> Cow<'_, str> {
    if label.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(label.to_ascii_lowercase())
    } else {
        Cow::Borrowed(label)
    }
}
