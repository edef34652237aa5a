//! Classification of `avatar` text records, see [ENSIP-12](https://docs.ens.domains/ensip/12).

use alloy_primitives::{Address, U256};
use ens_primitives::parse_address;
use regex::Regex;
use std::{fmt, sync::LazyLock};
use url::Url;

/// `eip155:<chain id>/<erc standard>:<contract>/<token id>`, per CAIP-22 and CAIP-29.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^eip155:([0-9]+)/(erc[0-9]+):(0x[0-9a-f]{40})/([0-9]+)$")
        .expect("invalid regex")
});

/// A reference to a single token held in an NFT contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TokenRef {
    /// The EIP-155 chain the contract lives on.
    pub chain_id: u64,
    /// The token contract.
    pub contract: Address,
    /// The token id, given in decimal in the record.
    pub token_id: U256,
}

impl fmt::Display for TokenRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "eip155:{}/{}/{}", self.chain_id, self.contract, self.token_id)
    }
}

/// The shape of an avatar record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Avatar {
    /// An `http` or `https` URL.
    Http(Url),
    /// An `ipfs` or `ipns` URL.
    ContentAddressed(Url),
    /// An inline `data:` URL.
    Data(Url),
    /// An ERC-721 token.
    Erc721(TokenRef),
    /// An ERC-1155 token.
    Erc1155(TokenRef),
    /// Anything else, kept verbatim.
    Unknown(String),
}

impl Avatar {
    /// Classifies an avatar record.
    ///
    /// This is purely syntactic: token references still have to be checked against the current
    /// owner of the name before they can be trusted.
    pub fn parse(text: &str) -> Self {
        if let Ok(url) = Url::parse(text) {
            match url.scheme() {
                "http" | "https" => return Self::Http(url),
                "ipfs" | "ipns" => return Self::ContentAddressed(url),
                "data" => return Self::Data(url),
                _ => {}
            }
        }

        match parse_token(text) {
            Some(("erc721", token)) => Self::Erc721(token),
            Some(("erc1155", token)) => Self::Erc1155(token),
            _ => Self::Unknown(text.to_string()),
        }
    }

    /// Whether `text` has the shape of a token reference, whatever its ERC standard.
    ///
    /// Such avatars are only trusted while the name resolves to an address.
    pub fn is_token_reference(text: &str) -> bool {
        TOKEN_RE.is_match(text)
    }

    /// The URL of a URL-shaped avatar.
    pub fn url(&self) -> Option<&Url> {
        match self {
            Self::Http(url) | Self::ContentAddressed(url) | Self::Data(url) => Some(url),
            Self::Erc721(_) | Self::Erc1155(_) | Self::Unknown(_) => None,
        }
    }

    /// The token of a token-shaped avatar.
    pub fn token(&self) -> Option<&TokenRef> {
        match self {
            Self::Erc721(token) | Self::Erc1155(token) => Some(token),
            _ => None,
        }
    }
}

impl fmt::Display for Avatar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(url) | Self::ContentAddressed(url) | Self::Data(url) => write!(f, "{url}"),
            Self::Erc721(token) => write!(f, "erc721 {token}"),
            Self::Erc1155(token) => write!(f, "erc1155 {token}"),
            Self::Unknown(text) => f.write_str(text),
        }
    }
}

/// Matches a token reference, returning the lowercased standard and the token.
fn parse_token(text: &str) -> Option<(&'static str, TokenRef)> {
    let caps = TOKEN_RE.captures(text)?;
    let standard = match caps[2].to_ascii_lowercase().as_str() {
        "erc721" => "erc721",
        "erc1155" => "erc1155",
        _ => return None,
    };
    let token = TokenRef {
        chain_id: caps[1].parse().ok()?,
        contract: parse_address(&caps[3]).ok()?,
        token_id: U256::from_str_radix(&caps[4], 10).ok()?,
    };
    Some((standard, token))
}
