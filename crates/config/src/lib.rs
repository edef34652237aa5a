//! # ens-config
//!
//! Configuration for ENS resolution, layered with [`figment`]. In increasing priority:
//!
//! 1. built-in defaults ([`Config::default`])
//! 2. an `ens.toml` file in the current directory or the closest parent directory that has one,
//!    or the file named by `ENS_CONFIG`
//! 3. `ENS_`-prefixed environment variables, e.g. `ENS_RPC_URL`

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

use alloy_primitives::Address;
use ens_resolver::{constants::ENS_REGISTRY, fetch::DEFAULT_IPFS_GATEWAY};
use ens_rpc::{BlockTag, Gateway};
use figment::{
    Figment, Metadata, Profile, Provider,
    providers::{Env, Serialized},
    value::{Dict, Map},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod error;
pub use error::{ConfigError, ExtractConfigError};

mod providers;
use providers::TomlFileProvider;

/// Resolution settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON-RPC endpoint of an Ethereum mainnet node.
    pub rpc_url: String,
    /// JWT sent as a bearer token.
    pub rpc_jwt: Option<String>,
    /// Project secret sent as basic auth, for Infura-style endpoints.
    pub rpc_project_secret: Option<String>,
    /// Request timeout in seconds.
    pub rpc_timeout: u64,
    /// HTTP gateway used for `ipfs://` and `ipns://` content.
    pub ipfs_gateway: String,
    pub opensea_api_key: Option<String>,
    /// The ENS registry contract.
    pub registry: Address,
    /// First block searched for record history.
    pub history_from_block: BlockTag,
    /// Last block searched for record history.
    pub history_to_block: BlockTag,
}

impl Config {
    /// The default config file name.
    pub const FILE_NAME: &'static str = "ens.toml";

    /// Environment variable naming a config file to use instead of `ens.toml`.
    pub const CONFIG_ENV: &'static str = "ENS_CONFIG";

    /// Prefix of the environment variables that override settings.
    pub const ENV_PREFIX: &'static str = "ENS_";

    /// Request timeout used unless configured otherwise, in seconds.
    pub const DEFAULT_RPC_TIMEOUT: u64 = 45;

    /// Loads the config from the default [`figment`](Self::figment).
    pub fn load() -> Result<Self, ExtractConfigError> {
        Self::try_from(Self::figment())
    }

    /// Loads the config from the default [`figment`](Self::figment) with `provider` merged on
    /// top, e.g. command line arguments.
    pub fn load_with(provider: impl Provider) -> Result<Self, ExtractConfigError> {
        Self::try_from(Self::figment().merge(provider))
    }

    /// Attempts to extract a `Config` from `provider`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ens_config::Config;
    /// use figment::providers::{Format, Toml};
    ///
    /// let figment = Config::figment().merge(Toml::string("rpc_timeout = 10"));
    /// let config = Config::try_from(figment).unwrap();
    /// assert_eq!(config.rpc_timeout, 10);
    /// ```
    pub fn try_from<T: Provider>(provider: T) -> Result<Self, ExtractConfigError> {
        trace!("load config with provider: {:?}", provider.metadata());
        Figment::from(provider).extract::<Self>().map_err(ExtractConfigError::new)
    }

    /// Returns the figment of defaults, config file and environment.
    pub fn figment() -> Figment {
        Figment::from(Self::default())
            .merge(TomlFileProvider::new(Some(Self::CONFIG_ENV), Self::FILE_NAME))
            .merge(Env::prefixed(Self::ENV_PREFIX).ignore(&["CONFIG", "DEBUG"]))
    }

    /// The request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout)
    }
}

impl Provider for Config {
    fn metadata(&self) -> Metadata {
        Metadata::named("ENS Config")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Serialized::defaults(self).data()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: Gateway::Cloudflare.url().to_string(),
            rpc_jwt: None,
            rpc_project_secret: None,
            rpc_timeout: Self::DEFAULT_RPC_TIMEOUT,
            ipfs_gateway: DEFAULT_IPFS_GATEWAY.to_string(),
            opensea_api_key: None,
            registry: ENS_REGISTRY,
            history_from_block: BlockTag::Earliest,
            history_to_block: BlockTag::Latest,
        }
    }
}
