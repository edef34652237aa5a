//! Decoding of [ENSIP-7](https://docs.ens.domains/ensip/7) content hashes.
//!
//! A content hash is a multicodec namespace tag followed by a CID. Only the namespaces and CID
//! shapes that map to a stable URL are supported; anything else decodes to `None`.

use alloy_primitives::{B256, hex};
use ens_primitives::{BASE36, BASE58, varint};
use std::fmt;

/// `ipfs-ns`, CIDv1, `dag-pb`
const IPFS_DAG_PB: [u8; 4] = [0xe3, 0x01, 0x01, 0x70];
/// `swarm-ns`, CIDv1, `swarm-manifest`, `keccak-256`, 32 bytes
const SWARM_MANIFEST: [u8; 7] = [0xe4, 0x01, 0x01, 0xfa, 0x01, 0x1b, 0x20];
const SWARM_LEN: usize = SWARM_MANIFEST.len() + 32;
/// `ipns-ns`, CIDv1, `dag-pb`
const IPNS_DAG_PB: [u8; 4] = [0xe5, 0x01, 0x01, 0x70];
/// `ipns-ns`, CIDv1, `libp2p-key`
const IPNS_LIBP2P_KEY: [u8; 4] = [0xe5, 0x01, 0x01, 0x72];

/// The `identity` multihash code: the digest is the content itself.
const IDENTITY: u64 = 0x00;

/// A decoded content hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentHash {
    /// An IPFS multihash, base58 encoded.
    Ipfs(String),
    /// An IPNS name published as a DNSLink, e.g. `app.uniswap.org`.
    IpnsDnsLink(String),
    /// An IPNS name given by a libp2p public key, as a base36 CIDv1 without the multibase prefix.
    IpnsKey(String),
    /// A Swarm manifest hash.
    Swarm(B256),
}

impl ContentHash {
    /// Decodes raw content hash bytes, returning `None` for unsupported or malformed input.
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        if let Some(rest) = bytes.strip_prefix(&IPFS_DAG_PB) {
            multihash_content(bytes, IPFS_DAG_PB.len())?;
            return Some(Self::Ipfs(BASE58.encode(rest)));
        }

        if bytes.starts_with(&SWARM_MANIFEST) {
            if bytes.len() != SWARM_LEN {
                return None;
            }
            return Some(Self::Swarm(B256::from_slice(&bytes[SWARM_MANIFEST.len()..])));
        }

        if bytes.starts_with(&IPNS_DAG_PB) {
            let (code, content) = multihash_content(bytes, IPNS_DAG_PB.len())?;
            // hashed IPNS records have no stable URL form
            if code != IDENTITY {
                return None;
            }
            let link = std::str::from_utf8(content).ok()?;
            return Some(Self::IpnsDnsLink(link.to_string()));
        }

        if bytes.starts_with(&IPNS_LIBP2P_KEY) {
            let (code, key) = multihash_content(bytes, IPNS_LIBP2P_KEY.len())?;
            if code != IDENTITY {
                return None;
            }
            // re-wrap the key as a CIDv1: version, libp2p-key, identity, length
            let mut cid = vec![0x01, 0x72, 0x00];
            cid.extend(varint::encode(key.len() as u64).ok()?);
            cid.extend_from_slice(key);
            return Some(Self::IpnsKey(BASE36.encode(&cid).to_ascii_lowercase()));
        }

        None
    }

    /// The URL scheme this content hash maps to.
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::Ipfs(_) => "ipfs",
            Self::IpnsDnsLink(_) | Self::IpnsKey(_) => "ipns",
            Self::Swarm(_) => "bzz",
        }
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ipfs(cid) => write!(f, "ipfs://{cid}"),
            Self::IpnsDnsLink(link) => write!(f, "ipns://{link}"),
            // `k` is the multibase prefix of lowercase base36
            Self::IpnsKey(cid) => write!(f, "ipns://k{cid}"),
            Self::Swarm(hash) => write!(f, "bzz://{}", hex::encode(hash)),
        }
    }
}

/// Reads the multihash at `offset`: a code varint, a length varint and exactly that many bytes
/// up to the end of the buffer.
fn multihash_content(bytes: &[u8], offset: usize) -> Option<(u64, &[u8])> {
    let (code, offset) = varint::decode(bytes, offset).ok()?;
    let (len, offset) = varint::decode(bytes, offset).ok()?;
    let len = usize::try_from(len).ok()?;
    (offset.checked_add(len)? == bytes.len()).then(|| (code, &bytes[offset..]))
}
