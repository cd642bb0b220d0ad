//! Batch conversion of GROUP reports.
//!
//! Every input is an independent document: it is read, parsed, summarized,
//! flattened and exported on a blocking worker, with at most `workers`
//! documents in flight. A failing document is logged and counted; it never
//! stops the rest of the batch.

#[cfg(test)]
pub mod tests;

use crate::config::{ExportFormat, SolummaaConfig};
use crate::error::Result;
use crate::export::export_document;
use crate::grammar::Grammar;
use crate::models::{ProcessingStats, Record, Summary};
use crate::parser::parse_report;
use crate::records::flatten_summary;
use crate::source::ReportSource;
use crate::summary::{BuildOptions, build_summary};
use crate::version::ReportVersion;

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::task;
use tracing::{debug, error, info};

/// One fully processed report
#[derive(Debug, Clone)]
pub struct Document {
    pub source: ReportSource,
    pub summary: Summary,
    pub records: Vec<Record>,
}

/// Parse and summarize a report without flattening it
pub fn summarize_report(
    source: &ReportSource,
    grammar_text: Option<&str>,
    options: &BuildOptions,
) -> Result<Summary> {
    let grammar = match grammar_text {
        Some(text) => Grammar::parse(text, &source.version)?,
        None => Grammar::builtin(&source.version)?,
    };
    let raw = parse_report(&source.text, &grammar);
    build_summary(&raw, &source.version, options)
}

/// Run the whole pipeline on a report already in memory.
///
/// `grammar_text` replaces the shipped grammar when given.
pub fn process_report(
    source: ReportSource,
    grammar_text: Option<&str>,
    options: &BuildOptions,
) -> Result<Document> {
    let summary = summarize_report(&source, grammar_text, options)?;
    let records = flatten_summary(&summary)?;
    debug!(
        "{}: {} load cases, {} records",
        source.filename,
        summary.info.total_load_case,
        records.len()
    );
    Ok(Document {
        source,
        summary,
        records,
    })
}

/// Written files and record count of one converted input
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub records: usize,
    pub outputs: Vec<PathBuf>,
}

/// Read, convert and export one input file
pub fn convert_file(
    path: &Path,
    grammar_text: Option<&str>,
    config: &SolummaaConfig,
) -> Result<FileOutcome> {
    let source = ReportSource::from_path(path)?;
    let stem = source.stem();
    let options = config.build_options();

    // Records are only built when an output needs them
    let (summary, records) = if config.formats.iter().any(ExportFormat::needs_records) {
        let document = process_report(source, grammar_text, &options)?;
        (document.summary, document.records)
    } else {
        let summary = summarize_report(&source, grammar_text, &options)?;
        debug!("{}: summary only, records not flattened", source.filename);
        (summary, Vec::new())
    };

    let dir = match &config.output_dir {
        Some(dir) => dir.clone(),
        None => path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    let outputs = export_document(
        &summary,
        &records,
        &config.formats,
        &dir,
        &stem,
        config.overwrite,
    )?;

    Ok(FileOutcome {
        records: records.len(),
        outputs,
    })
}

/// Concurrent converter for a set of inputs
#[derive(Debug)]
pub struct BatchProcessor {
    config: Arc<SolummaaConfig>,
    grammar_text: Option<Arc<str>>,
    show_progress: bool,
}

impl BatchProcessor {
    /// Validate the configuration and load a custom grammar once for the batch
    pub fn new(config: SolummaaConfig) -> Result<Self> {
        config.validate()?;

        let grammar_text = match &config.grammar_path {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                // Reject a broken grammar before any document is read
                Grammar::parse(&text, &ReportVersion::new(12))?;
                info!("Using grammar from {}", path.display());
                Some(Arc::from(text))
            }
            None => None,
        };

        Ok(Self {
            config: Arc::new(config),
            grammar_text,
            show_progress: false,
        })
    }

    /// Show a progress bar on stderr while converting
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn config(&self) -> &SolummaaConfig {
        &self.config
    }

    /// Convert every input, isolating per-document failures
    pub async fn process(&self, inputs: &[PathBuf]) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        let progress = self.progress_bar(inputs.len());

        let stats = stream::iter(inputs.iter().cloned())
            .map(|path| {
                let config = Arc::clone(&self.config);
                let grammar_text = self.grammar_text.clone();
                async move {
                    let task_path = path.clone();
                    let result = task::spawn_blocking(move || {
                        convert_file(&task_path, grammar_text.as_deref(), &config)
                    })
                    .await;
                    (path, result)
                }
            })
            .buffer_unordered(self.config.workers)
            .fold(ProcessingStats::default(), |mut stats, (path, result)| {
                let progress = progress.clone();
                async move {
                    match result {
                        Ok(Ok(outcome)) => {
                            debug!(
                                "Converted {} ({} records)",
                                path.display(),
                                outcome.records
                            );
                            stats.files_processed += 1;
                            stats.total_records += outcome.records;
                            stats.outputs.extend(outcome.outputs);
                        }
                        Ok(Err(e)) => {
                            error!("Failed to convert {}: {}", path.display(), e);
                            stats.files_failed += 1;
                            stats.failures.push((path, e.to_string()));
                        }
                        Err(e) => {
                            error!("Worker for {} did not complete: {}", path.display(), e);
                            stats.files_failed += 1;
                            stats.failures.push((path, e.to_string()));
                        }
                    }
                    progress.inc(1);
                    stats
                }
            })
            .await;

        progress.finish_and_clear();

        let mut stats = stats;
        stats.processing_time_ms = start_time.elapsed().as_millis();
        info!(
            "Converted {} of {} inputs in {}ms",
            stats.files_processed,
            inputs.len(),
            stats.processing_time_ms
        );
        Ok(stats)
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    }
}
