//! Batch processing over well-formed inputs

use super::write_report;
use crate::config::{ExportFormat, SolummaaConfig};
use crate::error::SolummaaError;
use crate::processor::{BatchProcessor, convert_file, process_report};
use crate::source::{ReportSource, discover_inputs};
use crate::summary::BuildOptions;
use crate::summary::tests::sample_report;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_process_report_in_memory() {
    let source = ReportSource::from_text("pier4.gp12t", sample_report(false, &[3, 3])).unwrap();
    let document = process_report(source, None, &BuildOptions::default()).unwrap();

    let info = &document.summary.info;
    assert_eq!(document.records.len(), info.total_load_case * info.total_pile);
    assert_eq!(document.records[5].pile_id(), Some("p2_LOAD_2"));
}

#[test]
fn test_convert_file_next_to_input() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_report(temp_dir.path(), "abutment.gp8t", true, &[2]);

    let outcome = convert_file(&path, None, &SolummaaConfig::default()).unwrap();
    assert_eq!(outcome.records, 2);
    assert_eq!(outcome.outputs.len(), 3);
    assert!(temp_dir.path().join("abutment_summary.json").exists());
    assert!(temp_dir.path().join("abutment_records.csv").exists());
}

#[test]
fn test_summary_only_export_skips_flattening() {
    let temp_dir = TempDir::new().unwrap();
    // Drop the last maximum row so the per-pile tables no longer line up
    let text = sample_report(false, &[2]).replace(
        "   2   1.2E-03   4.5E+01   1.0E+01   3.5E+00\n",
        "",
    );
    let path = temp_dir.path().join("short.gp12t");
    fs::write(&path, text).unwrap();

    let summary_only = SolummaaConfig::default().with_formats(vec![ExportFormat::SummaryJson]);
    let outcome = convert_file(&path, None, &summary_only).unwrap();
    assert_eq!(outcome.records, 0);
    assert_eq!(outcome.outputs, vec![temp_dir.path().join("short_summary.json")]);

    let with_records = SolummaaConfig::default()
        .with_formats(vec![ExportFormat::RecordsCsv])
        .with_overwrite();
    assert!(matches!(
        convert_file(&path, None, &with_records),
        Err(SolummaaError::LengthMismatch { .. })
    ));
    assert!(!temp_dir.path().join("short_records.csv").exists());
}

#[tokio::test]
async fn test_batch_converts_every_input() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("reports");
    let output = temp_dir.path().join("out");
    write_report(&input, "pier1.gp12t", false, &[2, 2]);
    write_report(&input, "pier2.gp11t", false, &[3]);
    write_report(&input.join("old"), "pier3.gp8t", true, &[1, 1, 1]);

    let config = SolummaaConfig::default()
        .with_workers(2)
        .with_output_dir(output.clone())
        .with_formats(vec![ExportFormat::RecordsCsv]);
    let processor = BatchProcessor::new(config).unwrap();

    let inputs = discover_inputs(&input).unwrap();
    assert_eq!(inputs.len(), 3);
    let stats = processor.process(&inputs).await.unwrap();

    assert_eq!(stats.files_processed, 3);
    assert_eq!(stats.files_failed, 0);
    assert_eq!(stats.total_records, 4 + 3 + 3);
    assert_eq!(stats.outputs.len(), 3);
    for stem in ["pier1", "pier2", "pier3"] {
        assert!(output.join(format!("{}_records.csv", stem)).exists());
    }
    assert!(!output.join("pier1_summary.json").exists());
}

#[tokio::test]
async fn test_batch_with_custom_grammar() {
    let temp_dir = TempDir::new().unwrap();
    let grammar_path = temp_dir.path().join("custom.grammar");
    fs::write(&grammar_path, crate::grammar::GPT_GRAMMAR).unwrap();
    let path = write_report(temp_dir.path(), "pier.gp12t", false, &[2]);

    let config = SolummaaConfig::default()
        .with_grammar_path(grammar_path)
        .with_formats(vec![ExportFormat::SummaryJson]);
    let stats = BatchProcessor::new(config)
        .unwrap()
        .process(&[path])
        .await
        .unwrap();

    assert_eq!(stats.files_processed, 1);
    assert!(temp_dir.path().join("pier_summary.json").exists());
}

#[tokio::test]
async fn test_empty_batch() {
    let processor = BatchProcessor::new(SolummaaConfig::default()).unwrap();
    let stats = processor.process(&[]).await.unwrap();
    assert_eq!(stats.files_processed, 0);
    assert_eq!(stats.files_failed, 0);
}
