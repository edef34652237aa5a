//! JSON-RPC over HTTP.

use crate::{
    client::JsonRpcClient, error::TransportError, request::RpcMethodCall,
    response::ResponseResult,
};
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{
    Url,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde_json::Value;
use std::{
    fmt,
    str::FromStr,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

/// The default request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(45);

/// Public endpoints that need no credentials.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gateway {
    Cloudflare,
    MyCrypto,
    Flashbots,
    MyEtherWallet,
}

impl Gateway {
    pub const ALL: [Self; 4] =
        [Self::Cloudflare, Self::MyCrypto, Self::Flashbots, Self::MyEtherWallet];

    /// The endpoint URL.
    pub const fn url(&self) -> &'static str {
        match self {
            Self::Cloudflare => "https://cloudflare-eth.com/",
            Self::MyCrypto => "https://api.mycryptoapi.com/eth",
            Self::Flashbots => "https://rpc.flashbots.net/",
            Self::MyEtherWallet => "https://nodes.mewapi.io/rpc/eth",
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Cloudflare => "cloudflare",
            Self::MyCrypto => "mycrypto",
            Self::Flashbots => "flashbots",
            Self::MyEtherWallet => "mew",
        }
    }
}

impl FromStr for Gateway {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|gateway| gateway.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown gateway {s:?}"))
    }
}

/// Credentials sent in the `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    /// Infura style project secret, sent as HTTP basic auth with an empty user name.
    ProjectSecret(String),
    /// A JWT sent as a bearer token.
    Bearer(String),
}

impl Auth {
    fn header_value(&self) -> String {
        match self {
            Self::ProjectSecret(secret) => {
                format!("Basic {}", STANDARD.encode(format!(":{secret}")))
            }
            Self::Bearer(token) => format!("Bearer {token}"),
        }
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProjectSecret(_) => f.write_str("ProjectSecret(..)"),
            Self::Bearer(_) => f.write_str("Bearer(..)"),
        }
    }
}

/// Helper type to construct an [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    url: Result<Url, TransportError>,
    timeout: Duration,
    auth: Option<Auth>,
    headers: Vec<String>,
}

impl HttpClientBuilder {
    /// Creates a new builder instance.
    ///
    /// `localhost:<port>` is accepted as shorthand for `http://localhost:<port>`.
    pub fn new(url_str: &str) -> Self {
        let url_str = url_str.trim();
        let url_str = if url_str.starts_with("localhost:") {
            format!("http://{url_str}")
        } else {
            url_str.to_string()
        };
        let url = Url::parse(&url_str)
            .map_err(|source| TransportError::InvalidUrl { url: url_str, source });

        Self { url, timeout: REQUEST_TIMEOUT, auth: None, headers: vec![] }
    }

    /// Sets the request timeout, measured from connecting until the response body is read.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Authenticates with an Infura style project secret.
    pub fn project_secret(mut self, secret: impl Into<String>) -> Self {
        self.auth = Some(Auth::ProjectSecret(secret.into()));
        self
    }

    /// Authenticates with a bearer JWT.
    pub fn jwt(mut self, jwt: impl Into<String>) -> Self {
        self.auth = Some(Auth::Bearer(jwt.into()));
        self
    }

    pub fn auth(mut self, auth: Option<Auth>) -> Self {
        self.auth = auth;
        self
    }

    /// Sets extra headers, each formatted as `key:value`.
    pub fn headers(mut self, headers: Vec<String>) -> Self {
        self.headers = headers;
        self
    }

    /// Builds the client.
    pub fn build(self) -> Result<HttpClient, TransportError> {
        let Self { url, timeout, auth, headers: extra } = self;
        let url = url?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(TransportError::UnsupportedScheme(url.scheme().to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(auth) = &auth {
            let mut auth_value = HeaderValue::from_str(&auth.header_value())
                .map_err(|_| TransportError::BadHeader("authorization".to_string()))?;
            auth_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth_value);
        }

        for header in &extra {
            let make_err = || TransportError::BadHeader(header.to_string());

            let (key, val) = header.split_once(':').ok_or_else(make_err)?;

            headers.insert(
                HeaderName::from_str(key.trim()).map_err(|_| make_err())?,
                HeaderValue::from_str(val.trim()).map_err(|_| make_err())?,
            );
        }

        let client = reqwest::Client::builder().timeout(timeout).default_headers(headers).build()?;

        Ok(HttpClient { url, client, next_id: AtomicU64::new(1) })
    }
}

/// A [`JsonRpcClient`] that POSTs each call to a single endpoint.
#[derive(Debug)]
pub struct HttpClient {
    url: Url,
    client: reqwest::Client,
    next_id: AtomicU64,
}

impl HttpClient {
    /// Creates a client for `url` with default settings.
    pub fn new(url: &str) -> Result<Self, TransportError> {
        HttpClientBuilder::new(url).build()
    }

    pub fn builder(url: &str) -> HttpClientBuilder {
        HttpClientBuilder::new(url)
    }

    /// Creates a client for one of the public [`Gateway`]s.
    pub fn gateway(gateway: Gateway) -> Result<Self, TransportError> {
        Self::new(gateway.url())
    }

    /// The endpoint this client talks to.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl JsonRpcClient for HttpClient {
    async fn request(&self, method: &str, params: Value) -> Result<ResponseResult, TransportError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let call = RpcMethodCall::new(id, method, params)?;
        let payload = serde_json::to_vec(&call)?;

        debug!(target: "ens::rpc", %method, id, "sending request");
        trace!(target: "ens::rpc", payload = %String::from_utf8_lossy(&payload));

        let response = self.client.post(self.url.clone()).body(payload).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        trace!(target: "ens::rpc", id, %status, body = %String::from_utf8_lossy(&body));

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        ResponseResult::from_slice(&body)
    }
}
