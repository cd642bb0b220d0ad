//! Configuration for batch conversion.
//!
//! Defaults suit a single-user run over a folder of reports. A JSON file can
//! supply a persistent configuration and command-line flags are applied on
//! top of it.

use crate::error::{Result, SolummaaError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Output files written for every document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// `<stem>_summary.json`
    SummaryJson,
    /// `<stem>_records.json`
    RecordsJson,
    /// `<stem>_records.csv`
    RecordsCsv,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [
        ExportFormat::SummaryJson,
        ExportFormat::RecordsJson,
        ExportFormat::RecordsCsv,
    ];

    /// File-name suffix appended to the report stem
    pub fn suffix(&self) -> &'static str {
        match self {
            ExportFormat::SummaryJson => crate::constants::SUMMARY_JSON_SUFFIX,
            ExportFormat::RecordsJson => crate::constants::RECORDS_JSON_SUFFIX,
            ExportFormat::RecordsCsv => crate::constants::RECORDS_CSV_SUFFIX,
        }
    }

    /// Whether the format needs the flattened records
    pub fn needs_records(&self) -> bool {
        !matches!(self, ExportFormat::SummaryJson)
    }
}

/// Main configuration for report conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolummaaConfig {
    /// Documents converted concurrently
    pub workers: usize,

    /// Output directory; `None` writes next to each input
    pub output_dir: Option<PathBuf>,

    /// Files written per document
    pub formats: Vec<ExportFormat>,

    /// Grammar file replacing the shipped GPT grammar
    pub grammar_path: Option<PathBuf>,

    /// Fail documents whose load cases disagree on pile count
    pub strict_pile_count: bool,

    /// Replace existing output files
    pub overwrite: bool,
}

impl Default for SolummaaConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            output_dir: None,
            formats: ExportFormat::ALL.to_vec(),
            grammar_path: None,
            strict_pile_count: false,
            overwrite: false,
        }
    }
}

impl SolummaaConfig {
    /// Load a configuration file; missing keys keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        debug!("Loaded configuration from {}", path.display());
        config.validate()?;
        Ok(config)
    }

    /// Set worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set output directory
    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = Some(output_dir);
        self
    }

    /// Restrict the files written per document
    pub fn with_formats(mut self, formats: Vec<ExportFormat>) -> Self {
        self.formats = formats;
        self
    }

    /// Use a grammar file instead of the shipped grammar
    pub fn with_grammar_path(mut self, path: PathBuf) -> Self {
        self.grammar_path = Some(path);
        self
    }

    pub fn with_strict_pile_count(mut self) -> Self {
        self.strict_pile_count = true;
        self
    }

    pub fn with_overwrite(mut self) -> Self {
        self.overwrite = true;
        self
    }

    /// Check the configuration before any document is touched
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(SolummaaError::configuration("workers must be at least 1"));
        }
        if self.formats.is_empty() {
            return Err(SolummaaError::configuration(
                "at least one export format is required",
            ));
        }
        if let Some(path) = &self.grammar_path {
            if !path.is_file() {
                return Err(SolummaaError::configuration(format!(
                    "grammar file not found: {}",
                    path.display()
                )));
            }
        }
        if let Some(dir) = &self.output_dir {
            if dir.exists() && !dir.is_dir() {
                return Err(SolummaaError::configuration(format!(
                    "output path is not a directory: {}",
                    dir.display()
                )));
            }
        }
        Ok(())
    }

    /// Summary builder options derived from this configuration
    pub fn build_options(&self) -> crate::summary::BuildOptions {
        crate::summary::BuildOptions {
            strict_pile_count: self.strict_pile_count,
        }
    }
}
