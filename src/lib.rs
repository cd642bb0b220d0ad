//! GROUP Pile-Analysis Report Library
//!
//! A Rust library for turning GROUP pile-analysis output reports (`.gp8t`,
//! `.gp11t`, `.gp12t`) into a normalized summary and a flat record table.
//!
//! The pipeline runs in four stages:
//! - [`version`] - resolve the report version from its file name
//! - [`parser`] - scan the report text into a raw section tree, driven by a
//!   declarative [`grammar`]
//! - [`summary`] - normalize the raw tree into a version-independent
//!   [`Summary`], hiding the v8 vs v11/v12 layout differences
//! - [`records`] - flatten the summary into one [`Record`] per pile per load case
//!
//! Around the pipeline, [`source`] reads plain files and zip archives,
//! [`export`] writes JSON and CSV, and [`processor`] converts many documents
//! concurrently.
//!
//! ## Example
//!
//! ```rust,no_run
//! use solummaa::processor::process_report;
//! use solummaa::source::ReportSource;
//! use solummaa::summary::BuildOptions;
//!
//! # fn main() -> solummaa::Result<()> {
//! let source = ReportSource::from_path("pier4.gp12t".as_ref())?;
//! let document = process_report(source, None, &BuildOptions::default())?;
//! println!(
//!     "{} load cases x {} piles = {} records",
//!     document.summary.info.total_load_case,
//!     document.summary.info.total_pile,
//!     document.records.len()
//! );
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod grammar;
pub mod models;
pub mod parser;
pub mod processor;
pub mod records;
pub mod source;
pub mod summary;
pub mod version;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::{ExportFormat, SolummaaConfig};
pub use error::{Result, SolummaaError};
pub use models::{LoadSummary, Record, Row, Summary};
pub use version::{ReportLayout, ReportVersion, resolve_version};
