//! `convert`: batch export of reports

use super::shared::{print_stats, setup_logging};
use crate::cli::args::ConvertArgs;
use crate::processor::BatchProcessor;
use crate::source::discover_inputs;
use anyhow::{Context, bail};
use colored::*;
use std::path::PathBuf;
use tracing::{info, warn};

pub async fn run_convert(args: ConvertArgs) -> anyhow::Result<()> {
    setup_logging(&args.logging)?;

    let config = args.to_config().context("Invalid configuration")?;
    let inputs = collect_inputs(&args.inputs)?;
    if inputs.is_empty() {
        warn!("No GROUP reports found in the given inputs");
        println!("{}", "No reports to convert".bright_yellow());
        return Ok(());
    }
    info!(
        "Converting {} reports with {} workers",
        inputs.len(),
        config.workers
    );

    let processor = BatchProcessor::new(config)?.with_progress(args.logging.show_progress());
    let stats = processor.process(&inputs).await?;

    if !args.logging.quiet {
        print_stats(&stats, inputs.len());
    }
    if stats.files_failed > 0 {
        bail!(
            "{} of {} reports failed to convert",
            stats.files_failed,
            inputs.len()
        );
    }
    Ok(())
}

/// Expand directories and drop duplicates, keeping first-seen order
fn collect_inputs(paths: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut inputs: Vec<PathBuf> = Vec::new();
    for path in paths {
        let found = discover_inputs(path)
            .with_context(|| format!("Cannot read input {}", path.display()))?;
        for input in found {
            if !inputs.contains(&input) {
                inputs.push(input);
            }
        }
    }
    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_collect_inputs_deduplicates() {
        let temp_dir = TempDir::new().unwrap();
        let report = temp_dir.path().join("a.gp12t");
        fs::write(&report, "x").unwrap();

        let inputs =
            collect_inputs(&[report.clone(), temp_dir.path().to_path_buf()]).unwrap();
        assert_eq!(inputs, vec![report]);
    }

    #[test]
    fn test_collect_inputs_missing_path() {
        let err = collect_inputs(&[PathBuf::from("/nonexistent/reports")]).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/reports"));
    }
}
