//! Command implementations for the GPT report converter CLI
//!
//! Each subcommand lives in its own module; this module only dispatches.
//! Commands report failures through `anyhow` so the binary can print the
//! full context chain.

pub mod convert;
pub mod inspect;
pub mod raw;
pub mod shared;

use crate::cli::args::Commands;

/// Run one subcommand to completion
pub async fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Convert(args) => convert::run_convert(args).await,
        Commands::Inspect(args) => inspect::run_inspect(args).await,
        Commands::Raw(args) => raw::run_raw(args).await,
    }
}
