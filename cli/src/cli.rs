//! # CLI Interface
//!
//! Defines the command-line argument structure for `appkit-tx` using
//! `clap` derive. Supports five subcommands: `id`, `json`, `inputs`,
//! `outputs` and `version`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::logging::LogFormat;

/// Signed Ergo transaction inspector.
///
/// Loads a transaction in the node's JSON form, recomputes its id and
/// re-encodes it, optionally rendering output scripts in readable form.
#[derive(Parser, Debug)]
#[command(
    name = "appkit-tx",
    about = "Inspect signed Ergo transactions",
    version,
    propagate_version = true
)]
pub struct AppkitCli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Execution cost recorded on the loaded transaction.
    #[arg(long, global = true, env = "APPKIT_TX_COST", default_value_t = 0)]
    pub cost: u64,

    /// Chain height used for box confirmations.
    #[arg(long, global = true, env = "APPKIT_HEIGHT", default_value_t = 0)]
    pub height: u32,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Default log level. `RUST_LOG` takes precedence when set.
    #[arg(long, global = true, env = "APPKIT_LOG", default_value = "warn")]
    pub log_level: String,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the recomputed transaction id.
    Id(SourceArgs),
    /// Re-encode the transaction as node-API JSON.
    Json(JsonArgs),
    /// List the signed inputs.
    Inputs(SourceArgs),
    /// List the boxes the transaction creates.
    Outputs(SourceArgs),
    /// Print version information and exit.
    Version,
}

/// Where to read the transaction from.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Path to a node-API transaction JSON file, or `-` for stdin.
    pub file: PathBuf,
}

/// Arguments for the `json` subcommand.
#[derive(Args, Debug)]
pub struct JsonArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Render output scripts through the tree codec.
    #[arg(long)]
    pub pretty: bool,

    /// Emit single-line JSON. Ignored together with `--pretty`.
    #[arg(long)]
    pub compact: bool,
}
