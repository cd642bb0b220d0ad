//! Command-line argument definitions for the GPT report converter
//!
//! Defines the CLI interface with the clap derive API: `convert` for batch
//! export, `inspect` for a one-document overview and `raw` for dumping the
//! raw parse tree while authoring grammars.

use crate::config::{ExportFormat, SolummaaConfig};
use crate::error::Result;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the GPT report converter
///
/// Parses GROUP pile-analysis output reports (.gp8t, .gp11t, .gp12t) into a
/// normalized summary and one flat record per pile per load case.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "solummaa",
    version,
    about = "Convert GROUP pile-analysis reports into JSON and CSV",
    long_about = "Parses GROUP pile-analysis output reports (.gp8t, .gp11t, .gp12t, or zip \
                  archives holding one) into a normalized per-load-case summary and a flat \
                  table with one record per pile per load case."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Convert reports to summary JSON, records JSON and records CSV
    Convert(ConvertArgs),
    /// Show the document overview of one report
    Inspect(InspectArgs),
    /// Dump the raw parse tree of one report as JSON
    Raw(RawArgs),
}

/// Logging flags shared by every subcommand
#[derive(Debug, Clone, ClapArgs)]
pub struct LoggingArgs {
    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl LoggingArgs {
    /// Log level for the crate filter
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Output file kinds selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// <stem>_summary.json
    Summary,
    /// <stem>_records.json
    Records,
    /// <stem>_records.csv
    Csv,
}

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Summary => ExportFormat::SummaryJson,
            FormatArg::Records => ExportFormat::RecordsJson,
            FormatArg::Csv => ExportFormat::RecordsCsv,
        }
    }
}

/// Arguments for the convert command
#[derive(Debug, Clone, Parser)]
pub struct ConvertArgs {
    /// Report files, zip archives or directories to search
    #[arg(value_name = "INPUT", required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Output directory; defaults to the folder of each input
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Documents converted concurrently
    #[arg(short = 'j', long = "workers", value_name = "N")]
    pub workers: Option<usize>,

    /// Files to write per document
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        value_delimiter = ',',
        value_name = "LIST",
        help = "Comma-separated output files to write (summary, records, csv)"
    )]
    pub formats: Vec<FormatArg>,

    /// Grammar file replacing the shipped GPT grammar
    #[arg(long = "grammar", value_name = "FILE")]
    pub grammar: Option<PathBuf>,

    /// JSON configuration file; command-line flags override its values
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Fail documents whose load cases report different pile counts
    #[arg(long = "strict-pile-count")]
    pub strict_pile_count: bool,

    /// Replace existing output files
    #[arg(long = "overwrite")]
    pub overwrite: bool,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

impl ConvertArgs {
    /// Configuration file (or defaults) with command-line overrides applied
    pub fn to_config(&self) -> Result<SolummaaConfig> {
        let mut config = match &self.config {
            Some(path) => SolummaaConfig::from_json_file(path)?,
            None => SolummaaConfig::default(),
        };

        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        if let Some(dir) = &self.output_dir {
            config = config.with_output_dir(dir.clone());
        }
        if !self.formats.is_empty() {
            let mut formats: Vec<ExportFormat> = Vec::new();
            for format in self.formats.iter().copied().map(ExportFormat::from) {
                if !formats.contains(&format) {
                    formats.push(format);
                }
            }
            config = config.with_formats(formats);
        }
        if let Some(grammar) = &self.grammar {
            config = config.with_grammar_path(grammar.clone());
        }
        if self.strict_pile_count {
            config = config.with_strict_pile_count();
        }
        if self.overwrite {
            config = config.with_overwrite();
        }

        config.validate()?;
        Ok(config)
    }
}

/// Arguments for the inspect command
#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    /// Report file or zip archive
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Grammar file replacing the shipped GPT grammar
    #[arg(long = "grammar", value_name = "FILE")]
    pub grammar: Option<PathBuf>,

    /// Print the full summary as JSON instead of the overview
    #[arg(long = "json")]
    pub json: bool,

    /// Fail when load cases report different pile counts
    #[arg(long = "strict-pile-count")]
    pub strict_pile_count: bool,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

/// Arguments for the raw command
#[derive(Debug, Clone, Parser)]
pub struct RawArgs {
    /// Report file or zip archive
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Grammar file replacing the shipped GPT grammar
    #[arg(long = "grammar", value_name = "FILE")]
    pub grammar: Option<PathBuf>,

    /// Write the tree to a file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

impl Commands {
    /// Logging flags of the selected subcommand
    pub fn logging(&self) -> &LoggingArgs {
        match self {
            Commands::Convert(args) => &args.logging,
            Commands::Inspect(args) => &args.logging,
            Commands::Raw(args) => &args.logging,
        }
    }
}
