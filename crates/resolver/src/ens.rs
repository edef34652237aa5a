//! Name resolution: registry lookup, then record accessors on the bound resolver.

use crate::{
    avatar::{Avatar, TokenRef},
    constants::ENS_REGISTRY,
    contenthash::ContentHash,
    contracts::{Erc721, Erc1155, PublicResolver, Registry},
    error::EnsError,
    fetch::{
        ContentFetcher, DEFAULT_IPFS_GATEWAY, HttpFetcher, IpfsGateway, NftPlatform, OpenSea,
        ReqwestFetcher, decode_data_url, json_url,
    },
    history::{self, HistoryEntry},
};
use alloy_primitives::{Address, B256, Bytes};
use ens_primitives::{AbiDecoder, namehash};
use ens_rpc::{BlockTag, JsonRpcClient};
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// Entry point for resolving names.
///
/// Cheap to clone: the node client and the off-chain collaborators are shared.
#[derive(Clone, Debug)]
pub struct Ens {
    client: Arc<dyn JsonRpcClient>,
    registry: Address,
    content: Arc<dyn ContentFetcher>,
    http: Arc<dyn HttpFetcher>,
    nft: Arc<dyn NftPlatform>,
    from_block: BlockTag,
    to_block: BlockTag,
}

impl Ens {
    /// Creates a resolver against the mainnet registry, fetching content through the public IPFS
    /// gateway and falling back to OpenSea for token images.
    pub fn new(client: impl JsonRpcClient + 'static) -> Self {
        Self::with_client(Arc::new(client))
    }

    pub fn with_client(client: Arc<dyn JsonRpcClient>) -> Self {
        let http: Arc<dyn HttpFetcher> = Arc::new(ReqwestFetcher::default());
        Self {
            client,
            registry: ENS_REGISTRY,
            content: Arc::new(IpfsGateway::new(DEFAULT_IPFS_GATEWAY, http.clone())),
            nft: Arc::new(OpenSea::new(None, http.clone())),
            http,
            from_block: BlockTag::Earliest,
            to_block: BlockTag::Latest,
        }
    }

    /// Uses a different registry contract.
    pub fn registry(mut self, registry: Address) -> Self {
        self.registry = registry;
        self
    }

    pub fn http_fetcher(mut self, http: Arc<dyn HttpFetcher>) -> Self {
        self.http = http;
        self
    }

    pub fn content_fetcher(mut self, content: Arc<dyn ContentFetcher>) -> Self {
        self.content = content;
        self
    }

    pub fn nft_platform(mut self, nft: Arc<dyn NftPlatform>) -> Self {
        self.nft = nft;
        self
    }

    /// Restricts history searches to the given block range.
    pub fn history_range(mut self, from: BlockTag, to: BlockTag) -> Self {
        self.from_block = from;
        self.to_block = to;
        self
    }

    /// Looks up the resolver of `name`, returning `None` if the registry has none.
    pub async fn resolver(&self, name: &str) -> Result<Option<NameResolver>, EnsError> {
        let node = namehash(name);
        let registry = Registry::new(self.client.clone(), self.registry);
        let Some(address) = registry.resolver(node).await? else {
            debug!(target: "ens", %name, "no resolver");
            return Ok(None);
        };
        debug!(target: "ens", %name, resolver = %address, "found resolver");
        Ok(Some(NameResolver {
            ens: self.clone(),
            name: name.to_string(),
            node,
            resolver: PublicResolver::new(self.client.clone(), address),
        }))
    }

    /// Returns the raw content hash of `name`.
    pub async fn resolve(&self, name: &str) -> Result<Option<Bytes>, EnsError> {
        match self.resolver(name).await? {
            Some(resolver) => resolver.contenthash_bytes().await,
            None => Ok(None),
        }
    }

    /// Fetches `url`, which may be a `data:`, content-addressed or HTTP(S) URL.
    pub async fn fetch(&self, url: &Url) -> Result<Option<Bytes>, EnsError> {
        match url.scheme() {
            "data" => Ok(decode_data_url(url.as_str())),
            "ipfs" | "ipns" => Ok(self.content.fetch(url).await?),
            _ => Ok(self.http.get(url, &[]).await?),
        }
    }

    /// Fetches token metadata from `metadata_url` and returns its `image`.
    pub async fn token_image_url(&self, metadata_url: &Url) -> Result<Option<Url>, EnsError> {
        let Some(body) = self.fetch(metadata_url).await? else { return Ok(None) };
        match serde_json::from_slice::<Value>(&body) {
            Ok(metadata) => Ok(json_url(&metadata, "image")),
            Err(err) => {
                warn!(target: "ens::avatar", url = %metadata_url, %err, "invalid token metadata");
                Ok(None)
            }
        }
    }
}

/// The resolver bound to one name.
///
/// Accessors are independent of each other and each returns `None` for an unset record.
#[derive(Clone, Debug)]
pub struct NameResolver {
    ens: Ens,
    name: String,
    node: B256,
    resolver: PublicResolver,
}

impl NameResolver {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node(&self) -> B256 {
        self.node
    }

    /// The address of the resolver contract.
    pub fn address(&self) -> Address {
        self.resolver.address()
    }

    pub async fn supports_interface(&self, interface: [u8; 4]) -> Result<bool, EnsError> {
        Ok(self.resolver.supports_interface(interface).await?)
    }

    /// The address record.
    pub async fn addr(&self) -> Result<Option<Address>, EnsError> {
        Ok(self.resolver.addr(self.node).await?)
    }

    /// The text record under `key`.
    pub async fn text(&self, key: &str) -> Result<Option<String>, EnsError> {
        Ok(self.resolver.text(self.node, key).await?)
    }

    /// The undecoded content hash.
    pub async fn contenthash_bytes(&self) -> Result<Option<Bytes>, EnsError> {
        Ok(self.resolver.contenthash(self.node).await?)
    }

    /// The content hash, if set and in a supported encoding.
    pub async fn contenthash(&self) -> Result<Option<ContentHash>, EnsError> {
        Ok(self.contenthash_bytes().await?.and_then(|bytes| ContentHash::decode(&bytes)))
    }

    /// The avatar record, with token references verified against the name's address.
    ///
    /// A token reference is dropped when the name has no address record. ERC-721 and ERC-1155
    /// tokens must also be held by that address; other standards are kept as
    /// [`Avatar::Unknown`].
    pub async fn avatar(&self) -> Result<Option<Avatar>, EnsError> {
        let Some(text) = self.text("avatar").await? else { return Ok(None) };
        let avatar = Avatar::parse(&text);
        if !Avatar::is_token_reference(&text) {
            return Ok(Some(avatar));
        }

        let Some(owner) = self.addr().await? else {
            debug!(target: "ens::avatar", name = %self.name, %avatar, "no address set");
            return Ok(None);
        };
        let verified = match &avatar {
            Avatar::Erc721(token) => self.owns_erc721(owner, token).await?,
            Avatar::Erc1155(token) => self.owns_erc1155(owner, token).await?,
            _ => true,
        };
        if !verified {
            debug!(target: "ens::avatar", name = %self.name, %avatar, "token not held by owner");
            return Ok(None);
        }
        Ok(Some(avatar))
    }

    async fn owns_erc721(&self, owner: Address, token: &TokenRef) -> Result<bool, EnsError> {
        let contract = Erc721::new(self.ens.client.clone(), token.contract);
        Ok(contract.owner_of(token.token_id).await? == Some(owner))
    }

    async fn owns_erc1155(&self, owner: Address, token: &TokenRef) -> Result<bool, EnsError> {
        let contract = Erc1155::new(self.ens.client.clone(), token.contract);
        Ok(!contract.balance_of(owner, token.token_id).await?.is_zero())
    }

    /// Resolves an avatar to the URL of its image.
    ///
    /// Token avatars use the token's metadata URI, or the NFT platform if the contract has none.
    pub async fn avatar_image_url(&self, avatar: &Avatar) -> Result<Option<Url>, EnsError> {
        let (token, metadata) = match avatar {
            Avatar::Http(url) | Avatar::ContentAddressed(url) | Avatar::Data(url) => {
                return Ok(Some(url.clone()));
            }
            Avatar::Unknown(_) => return Ok(None),
            Avatar::Erc721(token) => {
                let contract = Erc721::new(self.ens.client.clone(), token.contract);
                (token, contract.token_uri(token.token_id).await)
            }
            Avatar::Erc1155(token) => {
                let contract = Erc1155::new(self.ens.client.clone(), token.contract);
                (token, contract.uri(token.token_id).await)
            }
        };

        match metadata {
            Ok(Some(uri)) => {
                if let Ok(metadata_url) = Url::parse(&uri) {
                    return self.ens.token_image_url(&metadata_url).await;
                }
            }
            Ok(None) => {}
            // contracts are not required to implement the metadata extension
            Err(err) if err.is_ethereum_error() => {
                debug!(target: "ens::avatar", %token, %err, "no token metadata");
            }
            Err(err) => return Err(err.into()),
        }

        Ok(self.ens.nft.image_url(token.contract, token.token_id).await?)
    }

    /// The image of the avatar, if any.
    pub async fn avatar_image(&self) -> Result<Option<Bytes>, EnsError> {
        let Some(avatar) = self.avatar().await? else { return Ok(None) };
        let Some(url) = self.avatar_image_url(&avatar).await? else { return Ok(None) };
        self.ens.fetch(&url).await
    }

    /// Past address records, newest first.
    pub async fn addr_history(&self) -> Result<Vec<HistoryEntry<Address>>, EnsError> {
        let (from, to) = (self.ens.from_block, self.ens.to_block);
        let logs = self.resolver.addr_changed_logs(self.node, from, to).await?;
        let decode = |data: &str| AbiDecoder::new(data).address(0).map(|(addr, _)| addr);
        Ok(history::collect(self.ens.client.as_ref(), logs, decode).await?)
    }

    /// Past content hashes, newest first. Hashes in unsupported encodings are kept as `None`.
    pub async fn contenthash_history(
        &self,
    ) -> Result<Vec<HistoryEntry<Option<ContentHash>>>, EnsError> {
        let (from, to) = (self.ens.from_block, self.ens.to_block);
        let logs = self.resolver.contenthash_changed_logs(self.node, from, to).await?;
        let decode = |data: &str| {
            AbiDecoder::new(data).tail_bytes(0).map(|(hash, _)| ContentHash::decode(&hash))
        };
        Ok(history::collect(self.ens.client.as_ref(), logs, decode).await?)
    }
}
