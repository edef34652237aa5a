use chrono::DateTime;
use ens_config::Config;
use ens_resolver::{Ens, HttpFetcher, IpfsGateway, OpenSea, ReqwestFetcher};
use ens_rpc::HttpClient;
use eyre::{Result, WrapErr};
use std::sync::Arc;

/// Initializes a tracing Subscriber for logging
pub fn subscriber() {
    tracing_subscriber::FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

/// Returns a JSON-RPC client for the configured endpoint.
pub fn get_client(config: &Config) -> Result<HttpClient> {
    let mut builder = HttpClient::builder(&config.rpc_url).timeout(config.timeout());
    if let Some(jwt) = &config.rpc_jwt {
        builder = builder.jwt(jwt);
    }
    if let Some(secret) = &config.rpc_project_secret {
        builder = builder.project_secret(secret);
    }
    builder.build().wrap_err_with(|| format!("invalid RPC endpoint `{}`", config.rpc_url))
}

/// Returns an [`Ens`] wired to the configured node, gateway and NFT platform.
pub fn get_ens(config: &Config) -> Result<Ens> {
    let client = get_client(config)?;
    debug!(url = %client.url(), timeout = ?config.timeout(), "connecting");

    let http = reqwest::Client::builder()
        .timeout(config.timeout())
        .build()
        .wrap_err("failed to build HTTP client")?;
    let http: Arc<dyn HttpFetcher> = Arc::new(ReqwestFetcher::new(http));

    Ok(Ens::new(client)
        .registry(config.registry)
        .http_fetcher(http.clone())
        .content_fetcher(Arc::new(IpfsGateway::new(config.ipfs_gateway.clone(), http.clone())))
        .nft_platform(Arc::new(OpenSea::new(config.opensea_api_key.clone(), http)))
        .history_range(config.history_from_block, config.history_to_block))
}

/// Formats a unix timestamp as UTC date and time.
pub fn format_timestamp(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|time| time.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
