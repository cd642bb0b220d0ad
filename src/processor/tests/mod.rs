//! Tests for the batch processor
//!
//! Builds small input folders of generated reports in a temp directory.

pub mod batch_processing;

use crate::summary::tests::sample_report;
use std::fs;
use std::path::{Path, PathBuf};

/// Write a generated report to `dir/name`
fn write_report(dir: &Path, name: &str, legacy: bool, piles: &[usize]) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, sample_report(legacy, piles)).unwrap();
    path
}
