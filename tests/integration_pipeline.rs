//! Integration tests for the report pipeline
//!
//! These tests run the fixture reports under `tests/fixtures/` through
//! version resolution, parsing, summary building and flattening, and check
//! that both report generations produce the same normalized shape.

use solummaa::grammar::Grammar;
use solummaa::parser::parse_report;
use solummaa::processor::process_report;
use solummaa::records::{flatten_summary, record_columns};
use solummaa::source::ReportSource;
use solummaa::summary::{BuildOptions, build_summary};
use solummaa::{ReportLayout, SolummaaError, resolve_version};
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Full pipeline on the v12 fixture
///
/// Purpose: Validate the modern layout end to end (sequence-wrapped loads, split local reactions)
#[test]
fn test_modern_report_end_to_end() {
    let source = ReportSource::from_path(&fixture("pier4.gp12t")).unwrap();
    assert_eq!(source.version.layout(), ReportLayout::Modern);

    let document = process_report(source, None, &BuildOptions::default()).unwrap();
    let info = &document.summary.info;

    assert_eq!(info.group_version, "2019.12.5");
    assert_eq!(info.datetime, "14/06/2023 09:41:27");
    assert_eq!(info.computation_name, "PIER 4 FOUNDATION");
    assert_eq!(info.load_keys, vec!["LOAD_1", "LOAD_2"]);
    assert_eq!(info.total_load_case, 2);
    assert_eq!(info.total_pile, 3);

    let load_2 = &document.summary.loads["LOAD_2"];
    assert_eq!(load_2.info.case_name, "ULTIMATE - SEISMIC X");
    assert_eq!(load_2.info.load_type, "CYCLIC");
    assert_eq!(load_2.computation.load.load_vertical, 3000.0);
    assert_eq!(load_2.computation.load.moment_y, 620.0);
    assert_eq!(load_2.computation.displacement.vertical, 4.3e-3);

    let ids: Vec<_> = document
        .records
        .iter()
        .map(|r| r.pile_id().unwrap().to_string())
        .collect();
    assert_eq!(
        ids,
        vec![
            "p0_LOAD_1",
            "p1_LOAD_1",
            "p2_LOAD_1",
            "p0_LOAD_2",
            "p1_LOAD_2",
            "p2_LOAD_2"
        ]
    );
    assert_eq!(document.records.len(), info.total_load_case * info.total_pile);
}

/// Full pipeline on the v8 fixture
///
/// Purpose: Validate the legacy layout (direct loads, single local reaction table)
#[test]
fn test_legacy_report_end_to_end() {
    let source = ReportSource::from_path(&fixture("abutment.gp8t")).unwrap();
    assert_eq!(source.version.layout(), ReportLayout::Legacy);

    let document = process_report(source, None, &BuildOptions::default()).unwrap();
    let info = &document.summary.info;

    assert_eq!(info.group_version, "N/A");
    assert_eq!(info.computation_name, "WEST ABUTMENT");
    assert_eq!(info.total_load_case, 2);
    assert_eq!(info.total_pile, 2);
    assert_eq!(document.records.len(), 4);

    let record = &document.records[3];
    assert_eq!(record.pile_id(), Some("p1_LOAD_2"));
    assert_eq!(record.get("load_case"), Some("2"));
    assert_eq!(record.get("case_name"), Some("ULTIMATE"));
    assert_eq!(record.get("pile_group"), Some("2"));
    assert_eq!(record.get("local_torsion"), Some("0.0000E+00"));
    assert_eq!(record.get("local_moment_y"), Some("6.0000E+01"));
}

/// Both generations flatten to the same columns
///
/// Purpose: Downstream consumers must not care which GROUP version produced a report
#[test]
fn test_layouts_share_record_columns() {
    let modern = process_report(
        ReportSource::from_path(&fixture("pier4.gp12t")).unwrap(),
        None,
        &BuildOptions::default(),
    )
    .unwrap();
    let legacy = process_report(
        ReportSource::from_path(&fixture("abutment.gp8t")).unwrap(),
        None,
        &BuildOptions::default(),
    )
    .unwrap();

    let modern_columns = record_columns(&modern.records);
    assert_eq!(modern_columns, record_columns(&legacy.records));
    assert_eq!(modern_columns.len(), 39);

    for column in [
        "pile_id",
        "load_id",
        "load_case",
        "case_name",
        "load_type",
        "pile_group",
        "rf_y",
        "rf_z",
        "global_disp_x",
        "global_moment_z",
        "local_disp_axial",
        "local_axial_force",
        "local_torsion",
        "local_min_deflection",
        "local_max_soil_reaction",
    ] {
        assert!(modern_columns.iter().any(|c| c == column), "missing {}", column);
    }
    // only the grouping key escapes prefixing
    assert!(!modern_columns.iter().any(|c| c.ends_with("_pile_group")));
}

/// Stage-by-stage use of the public API
#[test]
fn test_pipeline_stages() {
    let text = std::fs::read_to_string(fixture("pier4.gp12t")).unwrap();
    let version = resolve_version("pier4.gp12t").unwrap();
    let grammar = Grammar::builtin(&version).unwrap();

    let raw = parse_report(&text, &grammar);
    assert!(raw.contains_key("HEADER_VERSION"));
    assert!(raw.contains_key("LOAD_1"));

    let summary = build_summary(&raw, &version, &BuildOptions::default()).unwrap();
    let records = flatten_summary(&summary).unwrap();
    assert_eq!(records.len(), 6);
    assert_eq!(records[4].get("local_max_moment"), Some("1.7200E+02"));
}

/// Wrong version for the text surfaces as a shape error, not a panic
#[test]
fn test_modern_text_with_legacy_extension() {
    let text = std::fs::read_to_string(fixture("pier4.gp12t")).unwrap();
    let source = ReportSource::from_text("pier4.gp8t", text).unwrap();

    match process_report(source, None, &BuildOptions::default()) {
        Err(SolummaaError::MissingSection { path }) => {
            assert_eq!(path, "LOAD_1/LOCAL_COORDINATE/TABLE_LOCAL_PILE_TOP_REACTIONS/DATA");
        }
        other => panic!("expected MissingSection, got {:?}", other.map(|d| d.records.len())),
    }
}
