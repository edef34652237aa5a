//! Command line options shared by the subcommands.

use clap::Parser;
use ens_config::{Config, ExtractConfigError};
use ens_rpc::Gateway;
use figment::{
    Metadata, Profile,
    value::{Dict, Map},
};

/// Options selecting the node and the off-chain services.
#[derive(Clone, Debug, Default, Parser)]
#[command(next_help_heading = "RPC options")]
pub struct RpcOpts {
    /// The RPC endpoint.
    #[arg(long = "rpc-url", short = 'r', env = "ETH_RPC_URL", value_name = "URL")]
    pub url: Option<String>,

    /// Use a public gateway instead of an RPC endpoint.
    ///
    /// One of `cloudflare`, `mycrypto`, `flashbots` or `mew`.
    #[arg(long, conflicts_with = "url", value_name = "NAME")]
    pub gateway: Option<Gateway>,

    /// JWT secret for the RPC endpoint.
    #[arg(long, env = "ETH_RPC_JWT_SECRET")]
    pub jwt_secret: Option<String>,

    /// Project secret for the RPC endpoint, sent as basic auth.
    #[arg(long, env = "ETH_RPC_PROJECT_SECRET", conflicts_with = "jwt_secret")]
    pub project_secret: Option<String>,

    /// Timeout for RPC and content requests in seconds.
    #[arg(long = "timeout", env = "ETH_RPC_TIMEOUT", value_name = "SECONDS")]
    pub rpc_timeout: Option<u64>,

    /// HTTP gateway for IPFS and IPNS content.
    #[arg(long, value_name = "URL")]
    pub ipfs_gateway: Option<String>,

    /// OpenSea API key, used to look up token images.
    #[arg(long, env = "OPENSEA_API_KEY")]
    pub opensea_api_key: Option<String>,
}

impl figment::Provider for RpcOpts {
    fn metadata(&self) -> Metadata {
        Metadata::named("RpcOpts")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Ok(Map::from([(Profile::Default, self.dict())]))
    }
}

impl RpcOpts {
    /// The RPC endpoint, if given on the command line.
    pub fn url(&self) -> Option<&str> {
        match (self.url.as_deref(), self.gateway) {
            (Some(url), _) => Some(url),
            (None, Some(gateway)) => Some(gateway.url()),
            (None, None) => None,
        }
    }

    /// Loads the config with these options taking precedence.
    pub fn load_config(&self) -> Result<Config, ExtractConfigError> {
        Config::load_with(self.clone())
    }

    pub fn dict(&self) -> Dict {
        let mut dict = Dict::new();
        if let Some(url) = self.url() {
            dict.insert("rpc_url".into(), url.into());
        }
        if let Some(jwt) = &self.jwt_secret {
            dict.insert("rpc_jwt".into(), jwt.clone().into());
        }
        if let Some(secret) = &self.project_secret {
            dict.insert("rpc_project_secret".into(), secret.clone().into());
        }
        if let Some(timeout) = self.rpc_timeout {
            dict.insert("rpc_timeout".into(), timeout.into());
        }
        if let Some(gateway) = &self.ipfs_gateway {
            dict.insert("ipfs_gateway".into(), gateway.clone().into());
        }
        if let Some(key) = self.opensea_api_key.as_ref().filter(|key| !key.trim().is_empty()) {
            dict.insert("opensea_api_key".into(), key.clone().into());
        }
        dict
    }
}
