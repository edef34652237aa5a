//! ENS name resolution.
//!
//! [`Ens`] hashes a name, asks the registry for its resolver and hands back a [`NameResolver`]
//! bound to it. Record accessors on the resolver return `Ok(None)` for unset records and only
//! fail on transport or node errors.
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use ens_resolver::Ens;
//! use ens_rpc::{Gateway, HttpClient};
//!
//! let ens = Ens::new(HttpClient::gateway(Gateway::Cloudflare)?);
//! if let Some(resolver) = ens.resolver("vitalik.eth").await? {
//!     println!("{:?}", resolver.addr().await?);
//!     println!("{:?}", resolver.contenthash().await?.map(|hash| hash.to_string()));
//! }
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod avatar;
pub mod constants;
pub mod contenthash;
pub mod contracts;
mod ens;
pub mod error;
pub mod fetch;
pub mod history;

pub use avatar::{Avatar, TokenRef};
pub use contenthash::ContentHash;
pub use ens::{Ens, NameResolver};
pub use error::{ContractError, EnsError, FetchError};
pub use fetch::{ContentFetcher, HttpFetcher, IpfsGateway, NftPlatform, OpenSea, ReqwestFetcher};
pub use history::HistoryEntry;
