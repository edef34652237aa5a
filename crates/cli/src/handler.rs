//! Error reports of the `ens` binary.

use ens_config::ExtractConfigError;
use ens_resolver::{ContractError, EnsError};
use ens_rpc::TransportError;
use eyre::{Chain, EyreHandler};
use std::{error::Error, fmt};

/// Renders reports as their de-duplicated cause chain, followed by a hint when the failure
/// points at the node, a gateway or the configuration.
///
/// With `ENS_DEBUG` set, reports are rendered by `color-eyre` instead.
#[derive(Default)]
pub struct Handler {
    verbose: Option<Box<dyn EyreHandler>>,
}

impl Handler {
    pub fn new(verbose: Option<Box<dyn EyreHandler>>) -> Self {
        Self { verbose }
    }
}

impl EyreHandler for Handler {
    fn display(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&causes(error).join("; "))
    }

    fn debug(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(verbose) = &self.verbose {
            return verbose.debug(error, f);
        }
        if f.alternate() {
            return fmt::Debug::fmt(error, f);
        }

        let causes = causes(error);
        let Some((message, sources)) = causes.split_first() else { return Ok(()) };
        write!(f, "{message}")?;
        for source in sources {
            write!(f, "\n  caused by: {source}")?;
        }
        if let Some(hint) = Chain::new(error).find_map(hint) {
            write!(f, "\n\nhint: {hint}")?;
        }
        Ok(())
    }

    fn track_caller(&mut self, location: &'static std::panic::Location<'static>) {
        if let Some(verbose) = &mut self.verbose {
            verbose.track_caller(location);
        }
    }
}

/// The messages of `error` and its sources, dropping sources already quoted by their parent.
fn causes(error: &(dyn Error + 'static)) -> Vec<String> {
    let mut causes: Vec<_> = Chain::new(error).map(|cause| cause.to_string()).collect();
    // `failed: node unreachable; node unreachable` -> `failed: node unreachable`
    causes.dedup_by(|cause, parent| parent.contains(cause.trim()));
    causes
}

fn hint(cause: &(dyn Error + 'static)) -> Option<&'static str> {
    if let Some(err) = cause.downcast_ref::<EnsError>() {
        return match err {
            EnsError::Contract(err) => contract_hint(err),
            EnsError::Fetch(_) => Some(FETCH_HINT),
        };
    }
    if let Some(err) = cause.downcast_ref::<ContractError>() {
        return contract_hint(err);
    }
    if let Some(err) = cause.downcast_ref::<TransportError>() {
        return Some(transport_hint(err));
    }
    cause.is::<ExtractConfigError>().then_some(CONFIG_HINT)
}

const CONFIG_HINT: &str =
    "check `ens.toml` (or the file named by `ENS_CONFIG`) and the `ENS_*` environment variables";

const FETCH_HINT: &str = "an off-chain resource could not be fetched; try another `--ipfs-gateway`";

fn contract_hint(err: &ContractError) -> Option<&'static str> {
    match err {
        ContractError::Transport(err) => Some(transport_hint(err)),
        ContractError::Ethereum(_) => {
            Some("the node rejected the call; the resolver may not implement this record")
        }
        ContractError::UnexpectedResult { .. } => {
            Some("the endpoint does not look like an Ethereum mainnet node")
        }
        ContractError::Abi(_) => None,
    }
}

fn transport_hint(err: &TransportError) -> &'static str {
    match err {
        TransportError::Status { status: 401 | 403, .. } => {
            "the node refused the credentials; check `--jwt-secret` or `--project-secret`"
        }
        TransportError::InvalidUrl { .. } | TransportError::UnsupportedScheme(_) => {
            "pass an http(s) endpoint with `--rpc-url` or `ETH_RPC_URL`"
        }
        _ => "the RPC endpoint failed; pick another with `--rpc-url` or `--gateway`",
    }
}

/// Installs the [`eyre`] and [`panic`](mod@std::panic) hooks as the global ones.
///
/// Reports use [`Handler`], or the `color-eyre` report when `ENS_DEBUG` is set. Panics always
/// use the `color-eyre` report.
pub fn install() {
    if std::env::var_os("RUST_BACKTRACE").is_none() {
        // SAFETY: runs first thing in `main`, before any other thread exists
        unsafe {
            std::env::set_var("RUST_BACKTRACE", "1");
        }
    }

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .panic_section("This is a bug. Please report it along with the command that triggered it.")
        .into_hooks();
    panic_hook.install();
    let eyre_hook = eyre_hook.into_eyre_hook();
    let verbose = std::env::var_os("ENS_DEBUG").is_some();
    if let Err(err) = eyre::set_hook(Box::new(move |e| {
        Box::new(Handler::new(verbose.then(|| eyre_hook(e))))
    })) {
        debug!("failed to install eyre error hook: {err}");
    }
}
