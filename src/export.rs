//! JSON and CSV output for summaries and records.

use crate::config::ExportFormat;
use crate::error::{Result, SolummaaError};
use crate::models::{Record, Summary};
use crate::records::record_columns;
use polars::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Pretty-printed summary JSON
pub fn summary_to_json(summary: &Summary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

/// Read a summary previously written by [`summary_to_json`]
pub fn summary_from_json(text: &str) -> Result<Summary> {
    Ok(serde_json::from_str(text)?)
}

/// Records as a JSON array of flat objects
pub fn records_to_json(records: &[Record]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Records as a string-typed frame; keys absent from a record become nulls
pub fn records_to_frame(records: &[Record]) -> Result<DataFrame> {
    let columns: Vec<Column> = record_columns(records)
        .into_iter()
        .map(|name| {
            let values: Vec<Option<String>> = records
                .iter()
                .map(|record| record.get(&name).map(str::to_string))
                .collect();
            Column::new(name.into(), values)
        })
        .collect();
    Ok(DataFrame::new(columns)?)
}

pub fn write_summary_json(path: &Path, summary: &Summary) -> Result<()> {
    let file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(file, summary)?;
    Ok(())
}

pub fn write_records_json(path: &Path, records: &[Record]) -> Result<()> {
    let file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(file, records)?;
    Ok(())
}

pub fn write_records_csv(path: &Path, records: &[Record]) -> Result<()> {
    let mut df = records_to_frame(records)?;
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)?;
    Ok(())
}

/// `<dir>/<stem><suffix>`
pub fn output_path(dir: &Path, stem: &str, format: ExportFormat) -> PathBuf {
    dir.join(format!("{}{}", stem, format.suffix()))
}

/// Write every requested format for one document, returning the written paths
pub fn export_document(
    summary: &Summary,
    records: &[Record],
    formats: &[ExportFormat],
    dir: &Path,
    stem: &str,
    overwrite: bool,
) -> Result<Vec<PathBuf>> {
    let targets: Vec<(ExportFormat, PathBuf)> = formats
        .iter()
        .map(|&format| (format, output_path(dir, stem, format)))
        .collect();

    // Check everything up front so a document is never half-written
    if !overwrite {
        if let Some((_, path)) = targets.iter().find(|(_, path)| path.exists()) {
            return Err(SolummaaError::OutputExists { path: path.clone() });
        }
    }

    std::fs::create_dir_all(dir)?;
    for (format, path) in &targets {
        match format {
            ExportFormat::SummaryJson => write_summary_json(path, summary)?,
            ExportFormat::RecordsJson => write_records_json(path, records)?,
            ExportFormat::RecordsCsv => write_records_csv(path, records)?,
        }
        debug!("Wrote {}", path.display());
    }

    Ok(targets.into_iter().map(|(_, path)| path).collect())
}
