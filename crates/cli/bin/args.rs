use clap::{Parser, Subcommand, ValueEnum, ValueHint};
use ens_cli::opts::RpcOpts;
use ens_primitives::AddressFormat;
use ens_rpc::BlockTag;
use std::path::PathBuf;

/// Resolve ENS names from the command line.
#[derive(Parser)]
#[command(name = "ens", version, next_display_order = None)]
pub struct EnsArgs {
    #[command(subcommand)]
    pub cmd: EnsSubcommand,
}

#[derive(Subcommand)]
pub enum EnsSubcommand {
    /// Calculate the ENS namehash of a name.
    #[command(visible_aliases = &["na", "nh"])]
    Namehash { name: String },

    /// Print the resolver contract of a name.
    Resolver {
        name: String,

        #[command(flatten)]
        rpc: RpcOpts,
    },

    /// Resolve a name to an address.
    #[command(visible_aliases = &["a", "resolve-name"])]
    Addr {
        name: String,

        /// How to print the address.
        #[arg(long, value_enum, default_value_t = AddressStyle::Checksum)]
        format: AddressStyle,

        #[command(flatten)]
        rpc: RpcOpts,
    },

    /// Print a text record of a name.
    Text {
        name: String,

        /// The record key, e.g. `url`, `email` or `com.twitter`.
        key: String,

        #[command(flatten)]
        rpc: RpcOpts,
    },

    /// Print the content hash of a name as a URL.
    #[command(visible_alias = "ch")]
    Contenthash {
        name: String,

        /// Print the undecoded hash as hex.
        #[arg(long)]
        raw: bool,

        #[command(flatten)]
        rpc: RpcOpts,
    },

    /// Print the avatar of a name, or fetch its image.
    Avatar {
        name: String,

        /// Print the URL of the avatar image instead of the avatar record.
        #[arg(long = "url", conflicts_with = "out")]
        image_url: bool,

        /// Write the avatar image to a file.
        #[arg(long, short, value_hint = ValueHint::FilePath, value_name = "PATH")]
        out: Option<PathBuf>,

        #[command(flatten)]
        rpc: RpcOpts,
    },

    /// Print past values of a record, newest first.
    History {
        /// The record to search.
        #[arg(value_enum)]
        record: HistoryRecord,

        name: String,

        /// The block to start searching from.
        #[arg(long, value_name = "BLOCK")]
        from_block: Option<BlockTag>,

        /// The block to stop searching at.
        #[arg(long, value_name = "BLOCK")]
        to_block: Option<BlockTag>,

        #[command(flatten)]
        rpc: RpcOpts,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AddressStyle {
    /// EIP-55 mixed-case checksum.
    Checksum,
    Lowercase,
    Uppercase,
}

impl From<AddressStyle> for AddressFormat {
    fn from(style: AddressStyle) -> Self {
        match style {
            AddressStyle::Checksum => Self::Checksum,
            AddressStyle::Lowercase => Self::Lowercase,
            AddressStyle::Uppercase => Self::Uppercase,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum HistoryRecord {
    /// `AddrChanged` events.
    Addr,
    /// `ContenthashChanged` events.
    Contenthash,
}
