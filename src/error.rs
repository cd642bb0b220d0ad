//! Error handling for GPT report processing.
//!
//! Every variant is terminal for the document being processed. Variants carry
//! enough context (section path, load key, field name) to locate the offending
//! table or line without re-parsing the report.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolummaaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Unrecognized report version in '{filename}': expected an extension like .gp8t, .gp11t or .gp12t")]
    UnrecognizedVersion { filename: String },

    #[error("Missing section: {path}")]
    MissingSection { path: String },

    #[error("Unexpected layout at {path} for {version} report: expected {expected}, found {found}")]
    VersionShapeMismatch {
        path: String,
        version: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Non-numeric value '{value}' for {section}.{field} in {load_key}")]
    NumericCoercion {
        load_key: String,
        section: String,
        field: String,
        value: String,
    },

    #[error("Table length mismatch in {load_key}: {table} has {found} rows, expected {expected}")]
    LengthMismatch {
        load_key: String,
        table: String,
        expected: usize,
        found: usize,
    },

    #[error("Load cases disagree on pile count: {load_key} has {found} piles, expected {expected}")]
    NonUniformPileCount {
        load_key: String,
        expected: usize,
        found: usize,
    },

    #[error("Grammar definition error at line {line}: {message}")]
    GrammarDefinition { line: usize, message: String },

    #[error("Input not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Archive contains no entries: {path}")]
    EmptyArchive { path: PathBuf },

    #[error("Output already exists: {path} (use --overwrite to replace)")]
    OutputExists { path: PathBuf },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl SolummaaError {
    /// Create a missing section error from path segments
    pub fn missing(path: impl Into<String>) -> Self {
        Self::MissingSection { path: path.into() }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a grammar definition error
    pub fn grammar(line: usize, message: impl Into<String>) -> Self {
        Self::GrammarDefinition {
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SolummaaError>;
