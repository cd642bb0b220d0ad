//! Integration tests for inputs and exported files
//!
//! Covers zip inputs, the batch converter and reading the written JSON and
//! CSV files back.

use polars::prelude::*;
use solummaa::export::summary_from_json;
use solummaa::models::Record;
use solummaa::processor::{BatchProcessor, process_report};
use solummaa::source::{ReportSource, discover_inputs};
use solummaa::summary::BuildOptions;
use solummaa::{ExportFormat, SolummaaConfig};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Zip a fixture under `entry_name`
fn zip_fixture(dir: &Path, archive: &str, fixture_name: &str, entry_name: &str) -> PathBuf {
    let path = dir.join(archive);
    let file = fs::File::create(&path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    writer
        .start_file(entry_name, SimpleFileOptions::default())
        .unwrap();
    writer
        .write_all(&fs::read(fixture(fixture_name)).unwrap())
        .unwrap();
    writer.finish().unwrap();
    path
}

/// Reading through an archive gives the same document as the plain file
#[test]
fn test_zip_input_matches_plain_file() {
    let temp_dir = TempDir::new().unwrap();
    let archive = zip_fixture(temp_dir.path(), "upload.zip", "pier4.gp12t", "pier4.gp12t");

    let zipped = ReportSource::from_path(&archive).unwrap();
    assert_eq!(zipped.filename, "pier4.gp12t");
    assert_eq!(zipped.version.number(), 12);

    let plain = ReportSource::from_path(&fixture("pier4.gp12t")).unwrap();
    let a = process_report(zipped, None, &BuildOptions::default()).unwrap();
    let b = process_report(plain, None, &BuildOptions::default()).unwrap();
    assert_eq!(a.summary, b.summary);
    assert_eq!(a.records, b.records);
}

/// The archive entry name, not the archive name, selects the version
#[test]
fn test_zip_entry_name_decides_version() {
    let temp_dir = TempDir::new().unwrap();
    let archive = zip_fixture(temp_dir.path(), "legacy.zip", "abutment.gp8t", "site/abutment.gp8t");

    let source = ReportSource::from_path(&archive).unwrap();
    assert_eq!(source.filename, "abutment.gp8t");
    assert_eq!(source.version.number(), 8);
}

/// Batch conversion of a folder with both generations and an archive
#[tokio::test]
async fn test_batch_conversion_writes_readable_outputs() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input");
    let output = temp_dir.path().join("output");
    fs::create_dir_all(&input).unwrap();
    fs::copy(fixture("pier4.gp12t"), input.join("pier4.gp12t")).unwrap();
    fs::copy(fixture("abutment.gp8t"), input.join("abutment.gp8t")).unwrap();
    zip_fixture(&input, "pier5.zip", "pier4.gp12t", "pier5.gp12t");

    let inputs = discover_inputs(&input).unwrap();
    assert_eq!(inputs.len(), 3);

    let config = SolummaaConfig::default()
        .with_workers(2)
        .with_output_dir(output.clone());
    let stats = BatchProcessor::new(config)
        .unwrap()
        .process(&inputs)
        .await
        .unwrap();

    assert_eq!(stats.files_processed, 3);
    assert_eq!(stats.files_failed, 0);
    assert_eq!(stats.total_records, 6 + 4 + 6);
    assert_eq!(stats.outputs.len(), 9);

    // Summary JSON reads back into the same model
    let summary_text = fs::read_to_string(output.join("pier4_summary.json")).unwrap();
    let summary = summary_from_json(&summary_text).unwrap();
    assert_eq!(summary.info.total_pile, 3);
    assert_eq!(summary.info.load_keys, vec!["LOAD_1", "LOAD_2"]);

    // Records JSON is a flat array of objects
    let records: Vec<Record> =
        serde_json::from_str(&fs::read_to_string(output.join("abutment_records.json")).unwrap())
            .unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].pile_id(), Some("p0_LOAD_1"));

    // CSV keeps one row per record and the record column order
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(output.join("pier5_records.csv")))
        .unwrap()
        .finish()
        .unwrap();
    assert_eq!(df.height(), 6);
    assert_eq!(df.width(), 39);
    assert_eq!(df.get_column_names()[0].as_str(), "pile_id");
    let ids = df.column("pile_id").unwrap().str().unwrap();
    assert_eq!(ids.get(5), Some("p2_LOAD_2"));
}

/// Restricted formats and overwrite protection
#[tokio::test]
async fn test_second_run_needs_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let report = temp_dir.path().join("pier4.gp12t");
    fs::copy(fixture("pier4.gp12t"), &report).unwrap();

    let config = SolummaaConfig::default().with_formats(vec![ExportFormat::RecordsCsv]);
    let first = BatchProcessor::new(config.clone())
        .unwrap()
        .process(&[report.clone()])
        .await
        .unwrap();
    assert_eq!(first.files_processed, 1);
    assert_eq!(first.outputs, vec![temp_dir.path().join("pier4_records.csv")]);

    let second = BatchProcessor::new(config.clone())
        .unwrap()
        .process(&[report.clone()])
        .await
        .unwrap();
    assert_eq!(second.files_failed, 1);
    assert!(second.failures[0].1.contains("already exists"));

    let third = BatchProcessor::new(config.with_overwrite())
        .unwrap()
        .process(&[report])
        .await
        .unwrap();
    assert_eq!(third.files_processed, 1);
}
