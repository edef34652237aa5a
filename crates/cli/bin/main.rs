#[macro_use]
extern crate tracing;

use clap::Parser;
use ens_cli::{handler, opts::RpcOpts, utils};
use ens_primitives::{format_address, hex, namehash};
use ens_resolver::{ContentHash, Ens, NameResolver};
use eyre::{Result, WrapErr};
use std::fmt::Display;

pub mod args;

use args::{EnsArgs, EnsSubcommand, HistoryRecord};

fn main() -> Result<()> {
    handler::install();
    utils::subscriber();
    let args = EnsArgs::parse();
    main_args(args)
}

#[tokio::main]
async fn main_args(args: EnsArgs) -> Result<()> {
    match args.cmd {
        EnsSubcommand::Namehash { name } => {
            println!("{}", namehash(&name));
        }
        EnsSubcommand::Resolver { name, rpc } => {
            if let (_, Some(resolver)) = resolve(&name, &rpc).await? {
                println!("{}", resolver.address());
            }
        }
        EnsSubcommand::Addr { name, format, rpc } => {
            let (_, Some(resolver)) = resolve(&name, &rpc).await? else { return Ok(()) };
            match resolver.addr().await? {
                Some(addr) => println!("{}", format_address(&addr, format.into())),
                None => absent(&name, "address"),
            }
        }
        EnsSubcommand::Text { name, key, rpc } => {
            let (_, Some(resolver)) = resolve(&name, &rpc).await? else { return Ok(()) };
            match resolver.text(&key).await? {
                Some(value) => println!("{value}"),
                None => absent(&name, format_args!("`{key}` text record")),
            }
        }
        EnsSubcommand::Contenthash { name, raw, rpc } => {
            let (_, Some(resolver)) = resolve(&name, &rpc).await? else { return Ok(()) };
            let Some(bytes) = resolver.contenthash_bytes().await? else {
                absent(&name, "content hash");
                return Ok(());
            };
            if raw {
                println!("{}", hex::encode_prefixed(&bytes));
            } else {
                match ContentHash::decode(&bytes) {
                    Some(hash) => println!("{hash}"),
                    None => eprintln!(
                        "{name}: unsupported content hash encoding {}",
                        hex::encode_prefixed(&bytes)
                    ),
                }
            }
        }
        EnsSubcommand::Avatar { name, image_url, out, rpc } => {
            let (ens, Some(resolver)) = resolve(&name, &rpc).await? else { return Ok(()) };
            let Some(avatar) = resolver.avatar().await? else {
                absent(&name, "avatar");
                return Ok(());
            };

            if !image_url && out.is_none() {
                println!("{avatar}");
                return Ok(());
            }

            let Some(url) = resolver.avatar_image_url(&avatar).await? else {
                absent(&name, "avatar image");
                return Ok(());
            };
            let Some(out) = out else {
                println!("{url}");
                return Ok(());
            };

            let Some(image) = ens.fetch(&url).await? else {
                eyre::bail!("could not fetch avatar image from {url}");
            };
            std::fs::write(&out, &image)
                .wrap_err_with(|| format!("failed to write {}", out.display()))?;
            eprintln!("wrote {} bytes to {}", image.len(), out.display());
        }
        EnsSubcommand::History { record, name, from_block, to_block, rpc } => {
            let mut config = rpc.load_config()?;
            if let Some(from) = from_block {
                config.history_from_block = from;
            }
            if let Some(to) = to_block {
                config.history_to_block = to;
            }
            let ens = utils::get_ens(&config)?;
            let Some(resolver) = lookup(&ens, &name).await? else { return Ok(()) };

            match record {
                HistoryRecord::Addr => {
                    let history = resolver.addr_history().await?;
                    if history.is_empty() {
                        absent(&name, "address history");
                    }
                    for entry in history {
                        print_entry(entry.timestamp, entry.block_number, entry.value);
                    }
                }
                HistoryRecord::Contenthash => {
                    let history = resolver.contenthash_history().await?;
                    if history.is_empty() {
                        absent(&name, "content hash history");
                    }
                    for entry in history {
                        let value = match entry.value {
                            Some(hash) => hash.to_string(),
                            None => "<unsupported encoding>".to_string(),
                        };
                        print_entry(entry.timestamp, entry.block_number, value);
                    }
                }
            }
        }
    }
    Ok(())
}

/// Loads the config for `rpc` and looks up the resolver of `name`.
async fn resolve(name: &str, rpc: &RpcOpts) -> Result<(Ens, Option<NameResolver>)> {
    let ens = utils::get_ens(&rpc.load_config()?)?;
    let resolver = lookup(&ens, name).await?;
    Ok((ens, resolver))
}

async fn lookup(ens: &Ens, name: &str) -> Result<Option<NameResolver>> {
    let resolver =
        ens.resolver(name).await.wrap_err_with(|| format!("failed to look up `{name}`"))?;
    if resolver.is_none() {
        absent(name, "resolver");
    }
    Ok(resolver)
}

fn print_entry(timestamp: u64, block: u64, value: impl Display) {
    println!("{}  {block:>10}  {value}", utils::format_timestamp(timestamp));
}

fn absent(name: &str, what: impl Display) {
    debug!(%name, %what, "record not set");
    eprintln!("{name}: no {what} set");
}
