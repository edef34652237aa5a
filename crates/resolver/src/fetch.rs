//! Off-chain collaborators: plain HTTP, content-addressed storage gateways and NFT platforms.

use crate::error::FetchError;
use alloy_primitives::{Address, Bytes, U256};
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use percent_encoding::percent_decode_str;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::{fmt, sync::Arc};
use url::Url;

/// The public IPFS gateway used when none is configured.
pub const DEFAULT_IPFS_GATEWAY: &str = "https://ipfs.io";

/// The OpenSea v1 API.
pub const OPENSEA_API: &str = "https://api.opensea.io/api/v1";

/// Fetches a URL over HTTP.
#[async_trait]
pub trait HttpFetcher: Send + Sync + fmt::Debug {
    /// Returns the response body, or `None` if the server answered with a non-2xx status.
    async fn get(&self, url: &Url, headers: &[(&str, &str)]) -> Result<Option<Bytes>, FetchError>;
}

/// Fetches `ipfs://` and `ipns://` URLs.
#[async_trait]
pub trait ContentFetcher: Send + Sync + fmt::Debug {
    /// Returns the content, or `None` if it could not be found.
    async fn fetch(&self, url: &Url) -> Result<Option<Bytes>, FetchError>;
}

/// Looks up token images on an NFT marketplace.
#[async_trait]
pub trait NftPlatform: Send + Sync + fmt::Debug {
    async fn image_url(&self, contract: Address, token_id: U256) -> Result<Option<Url>, FetchError>;
}

/// An [`HttpFetcher`] backed by [`reqwest`].
#[derive(Clone, Debug, Default)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn get(&self, url: &Url, headers: &[(&str, &str)]) -> Result<Option<Bytes>, FetchError> {
        let mut map = HeaderMap::new();
        for (key, value) in headers {
            let make_err = || FetchError::InvalidHeader(key.to_string());
            map.insert(
                HeaderName::from_bytes(key.as_bytes()).map_err(|_| make_err())?,
                HeaderValue::from_str(value).map_err(|_| make_err())?,
            );
        }

        debug!(target: "ens::fetch", %url, "GET");
        let response = self.client.get(url.clone()).headers(map).send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!(target: "ens::fetch", %url, %status, "request failed");
            return Ok(None);
        }
        Ok(Some(response.bytes().await?.into()))
    }
}

/// A [`ContentFetcher`] that rewrites content-addressed URLs onto an HTTP gateway.
#[derive(Clone, Debug)]
pub struct IpfsGateway {
    base: String,
    http: Arc<dyn HttpFetcher>,
}

impl IpfsGateway {
    /// Creates a gateway client for `base`, e.g. `https://ipfs.io`.
    pub fn new(base: impl Into<String>, http: Arc<dyn HttpFetcher>) -> Self {
        Self { base: base.into().trim_end_matches('/').to_string(), http }
    }

    /// Maps an `ipfs://` or `ipns://` URL to its gateway URL.
    ///
    /// The legacy `ipfs://ipfs/<cid>` form is accepted as well.
    pub fn gateway_url(&self, url: &Url) -> Option<Url> {
        let namespace = match url.scheme() {
            "ipfs" => "ipfs",
            "ipns" => "ipns",
            _ => return None,
        };
        let s = url.as_str();
        let path = match s.get(..12) {
            Some(prefix) if prefix.eq_ignore_ascii_case("ipfs://ipfs/") => &s[12..],
            _ => s.get(7..)?,
        };
        Url::parse(&format!("{}/{namespace}/{path}", self.base)).ok()
    }
}

#[async_trait]
impl ContentFetcher for IpfsGateway {
    async fn fetch(&self, url: &Url) -> Result<Option<Bytes>, FetchError> {
        let Some(gateway_url) = self.gateway_url(url) else {
            return Err(FetchError::InvalidUrl(url.to_string()));
        };
        self.http.get(&gateway_url, &[]).await
    }
}

/// The OpenSea asset API.
#[derive(Clone, Debug)]
pub struct OpenSea {
    base: String,
    api_key: Option<String>,
    http: Arc<dyn HttpFetcher>,
}

impl OpenSea {
    pub fn new(api_key: Option<String>, http: Arc<dyn HttpFetcher>) -> Self {
        Self { base: OPENSEA_API.to_string(), api_key, http }
    }

    /// Overrides the API base URL.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into().trim_end_matches('/').to_string();
        self
    }

    /// The asset endpoint for a token.
    pub fn asset_url(&self, contract: Address, token_id: U256) -> Result<Url, FetchError> {
        let url = format!("{}/asset/{contract:#x}/{token_id}/", self.base);
        Url::parse(&url).map_err(|_| FetchError::InvalidUrl(url))
    }
}

#[async_trait]
impl NftPlatform for OpenSea {
    async fn image_url(
        &self,
        contract: Address,
        token_id: U256,
    ) -> Result<Option<Url>, FetchError> {
        let url = self.asset_url(contract, token_id)?;
        let headers: Vec<(&str, &str)> =
            self.api_key.as_deref().map(|key| ("x-api-key", key)).into_iter().collect();
        let Some(body) = self.http.get(&url, &headers).await? else { return Ok(None) };
        match serde_json::from_slice::<Value>(&body) {
            Ok(asset) => Ok(json_url(&asset, "image_url")),
            Err(err) => {
                warn!(target: "ens::fetch", %url, %err, "invalid asset response");
                Ok(None)
            }
        }
    }
}

/// Reads `field` of a JSON object as a URL.
pub(crate) fn json_url(value: &Value, field: &str) -> Option<Url> {
    value.get(field).and_then(Value::as_str).and_then(|s| Url::parse(s).ok())
}

/// Decodes the payload of a `data:` URL, either base64 or percent-encoded.
pub fn decode_data_url(url: &str) -> Option<Bytes> {
    let rest = url.get(..5).filter(|s| s.eq_ignore_ascii_case("data:")).map(|_| &url[5..])?;
    let (meta, data) = rest.split_once(',')?;
    let decoded: Vec<u8> = percent_decode_str(data).collect();
    if meta.to_ascii_lowercase().ends_with(";base64") {
        let cleaned: Vec<u8> =
            decoded.into_iter().filter(|b| !b.is_ascii_whitespace()).collect();
        STANDARD.decode(cleaned).ok().map(Into::into)
    } else {
        Some(decoded.into())
    }
}
