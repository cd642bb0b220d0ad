//! Shared components for CLI commands

use crate::cli::args::LoggingArgs;
use crate::constants::LOG_TARGET;
use crate::models::ProcessingStats;
use crate::processor::{Document, process_report};
use crate::source::ReportSource;
use crate::summary::BuildOptions;
use anyhow::Context;
use colored::*;
use std::path::Path;
use tracing::debug;

/// Set up structured logging on stderr
///
/// `RUST_LOG` wins over the verbosity flags when set. Fails if a global
/// subscriber is already installed.
pub fn setup_logging(args: &LoggingArgs) -> anyhow::Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Read a grammar file given on the command line
pub fn read_grammar(path: Option<&Path>) -> anyhow::Result<Option<String>> {
    path.map(|path| {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read grammar file {}", path.display()))
    })
    .transpose()
}

/// Read and process one report on a blocking worker
pub async fn load_document(
    input: &Path,
    grammar: Option<&Path>,
    options: BuildOptions,
) -> anyhow::Result<Document> {
    let grammar_text = read_grammar(grammar)?;
    let input = input.to_path_buf();

    let document = tokio::task::spawn_blocking(move || {
        let source = ReportSource::from_path(&input)?;
        process_report(source, grammar_text.as_deref(), &options)
    })
    .await
    .context("Report worker did not complete")??;

    Ok(document)
}

/// Print the final batch report
pub fn print_stats(stats: &ProcessingStats, total_inputs: usize) {
    println!("\n{}", "Conversion Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time_ms.to_string().bright_white()
    );
    println!(
        "  {} {} of {}",
        "Reports converted:".bright_cyan(),
        stats.files_processed.to_string().bright_white().bold(),
        total_inputs
    );
    println!(
        "  {} {}",
        "Records:".bright_cyan(),
        stats.total_records.to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Files written:".bright_cyan(),
        stats.outputs.len().to_string().bright_white()
    );

    if stats.files_failed > 0 {
        println!(
            "  {} {}",
            "Reports failed:".bright_red(),
            stats.files_failed.to_string().bright_red().bold()
        );
        for (path, reason) in &stats.failures {
            println!("    {} {}", path.display().to_string().red(), reason);
        }
    }
}
