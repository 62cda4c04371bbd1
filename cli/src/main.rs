// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Appkit Transaction Inspector
//!
//! Entry point for the `appkit-tx` binary. Parses CLI arguments, initializes
//! logging, loads a node-API transaction document and runs one query over the
//! resulting signed transaction.
//!
//! The binary supports five subcommands:
//!
//! - `id`      — print the recomputed transaction id
//! - `json`    — re-encode as node-API JSON, optionally pretty-printed
//! - `inputs`  — list signed inputs with their proofs
//! - `outputs` — list created boxes
//! - `version` — print build version information

mod cli;
mod logging;

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use ergo_appkit::api::ErgoTransaction;
use ergo_appkit::transaction::ErgoLikeTransaction;
use ergo_appkit::{BlockchainContext, SignedTransaction};

use cli::{AppkitCli, Commands, GlobalArgs, SourceArgs};

fn main() -> Result<()> {
    let cli = AppkitCli::parse();
    logging::init_logging(&cli.global.log_level, cli.global.log_format);

    match cli.command {
        Commands::Id(args) => {
            let tx = load(&cli.global, &args)?;
            println!("{}", tx.id());
            Ok(())
        }
        Commands::Json(args) => {
            let tx = load(&cli.global, &args.source)?;
            let json = tx
                .to_json_with(args.pretty, !args.compact)
                .context("failed to encode transaction")?;
            println!("{}", json);
            Ok(())
        }
        Commands::Inputs(args) => {
            let tx = load(&cli.global, &args)?;
            for input in tx.signed_inputs() {
                println!(
                    "{}\t{}\t{}",
                    input.index(),
                    input.box_id(),
                    hex::encode(input.proof_bytes())
                );
            }
            Ok(())
        }
        Commands::Outputs(args) => {
            let tx = load(&cli.global, &args)?;
            for output in tx.outputs_to_spend() {
                println!(
                    "{}\t{}\t{}\t{}",
                    output.transaction_index(),
                    output.id(),
                    output.value(),
                    output.confirmations()
                );
            }
            Ok(())
        }
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Reads node JSON from the given source and wraps it as a signed
/// transaction in a context at the configured height.
fn load(global: &GlobalArgs, source: &SourceArgs) -> Result<SignedTransaction> {
    let text = read_source(&source.file)?;
    let api: ErgoTransaction = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a node transaction document", source.file.display()))?;
    let tx = ErgoLikeTransaction::try_from(&api)
        .with_context(|| format!("failed to load transaction from {}", source.file.display()))?;

    tracing::info!(
        inputs = tx.inputs.len(),
        outputs = tx.output_candidates.len(),
        height = global.height,
        "transaction loaded"
    );

    let ctx = BlockchainContext::builder().height(global.height).build();
    SignedTransaction::new(Arc::new(ctx), tx, global.cost)
        .with_context(|| format!("{} is not a well-formed transaction", source.file.display()))
}

fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read transaction from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Prints version information for the binary and the library.
fn print_version() {
    println!("appkit-tx    {}", env!("CARGO_PKG_VERSION"));
    println!("ergo-appkit  {}", ergo_appkit::VERSION);
    println!("rustc        {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}
