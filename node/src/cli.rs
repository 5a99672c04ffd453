//! # CLI Interface
//!
//! Defines the command-line argument structure for `chainlet-node` using
//! `clap` derive. Every `run` option can also be set through a
//! `CHAINLET_*` environment variable.

use clap::{Parser, Subcommand, ValueEnum};

use chainlet_protocol::config::{DEFAULT_HOST, DEFAULT_METRICS_PORT, DEFAULT_RPC_PORT};
use chainlet_protocol::ledger::{HashBinding, LedgerConfig};

use crate::logging::{LogFormat, DEFAULT_LOG_FILTER};

/// chainlet single-node ledger service.
///
/// Keeps an append-only chain of blocks in memory, queues transactions,
/// mines them into blocks on request, and accepts blocks from elsewhere
/// after checking their linkage and content hash.
#[derive(Parser, Debug)]
#[command(
    name = "chainlet-node",
    about = "chainlet single-node ledger service",
    version,
    propagate_version = true
)]
pub struct ChainletCli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the node binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the ledger service.
    Run(RunArgs),
    /// Print version information and exit.
    Version,
}

/// How mined blocks derive their hash, as spelled on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashBindingArg {
    /// Hash the new block's own fields.
    Own,
    /// Hash the previous block's fields (compatibility with older nodes).
    Parent,
}

impl From<HashBindingArg> for HashBinding {
    fn from(arg: HashBindingArg) -> Self {
        match arg {
            HashBindingArg::Own => HashBinding::OwnContent,
            HashBindingArg::Parent => HashBinding::ParentContent,
        }
    }
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Address to bind the HTTP API and metrics listeners on.
    #[arg(long, env = "CHAINLET_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port for the HTTP API.
    #[arg(long, env = "CHAINLET_RPC_PORT", default_value_t = DEFAULT_RPC_PORT)]
    pub rpc_port: u16,

    /// Port for the Prometheus metrics endpoint.
    #[arg(long, env = "CHAINLET_METRICS_PORT", default_value_t = DEFAULT_METRICS_PORT)]
    pub metrics_port: u16,

    /// Log output format.
    #[arg(long, env = "CHAINLET_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// `tracing` filter directive. `RUST_LOG`, when set, takes precedence.
    #[arg(long, env = "CHAINLET_LOG_FILTER", default_value = DEFAULT_LOG_FILTER)]
    pub log_filter: String,

    /// Which block's fields feed the hash of a newly mined block.
    ///
    /// `parent` reproduces nodes that hashed the previous block; their mined
    /// blocks do not pass content validation on other nodes.
    #[arg(
        long,
        env = "CHAINLET_HASH_BINDING",
        value_enum,
        default_value_t = HashBindingArg::Own
    )]
    pub hash_binding: HashBindingArg,
}

impl RunArgs {
    /// Ledger configuration selected by these arguments.
    pub fn ledger_config(&self) -> LedgerConfig {
        LedgerConfig {
            hash_binding: self.hash_binding.into(),
        }
    }
}
