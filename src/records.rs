//! Record flattener: one denormalized row per pile per load case.
//!
//! Each load case's seven per-pile tables are index-aligned: row `i` of every
//! table describes the same pile. Flattening prefixes every column with the
//! scope of its table (except the grouping key) and merges the rows of each
//! index into a single [`Record`].

use crate::constants::record_columns::{CASE_NAME, LOAD_CASE, LOAD_ID, LOAD_TYPE, PILE_ID};
use crate::constants::{GROUPING_KEY, prefixes};
use crate::error::{Result, SolummaaError};
use crate::models::{LoadSummary, Record, Row, Summary};
use indexmap::IndexSet;
use tracing::debug;

/// Flatten every load case of a summary, in `load_keys` order
pub fn flatten_summary(summary: &Summary) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    for (load_key, load) in summary.loads_in_order() {
        let load = load.ok_or_else(|| SolummaaError::missing(format!("LOAD/{}", load_key)))?;
        records.extend(flatten_load(load_key, load)?);
    }
    debug!(
        "Flattened {} load cases into {} records",
        summary.info.load_keys.len(),
        records.len()
    );
    Ok(records)
}

/// Flatten one load case into one record per pile, in pile index order
pub fn flatten_load(load_key: &str, load: &LoadSummary) -> Result<Vec<Record>> {
    let table = &load.table;
    let keep = [GROUPING_KEY];

    // Merge order; later tables overwrite earlier ones on a shared key
    let parts: [(&str, Vec<Row>); 7] = [
        ("reduction_factor", table.reduction_factor.clone()),
        (
            "GLOBAL/pile_top_displacements",
            prefix_rows(&table.global.pile_top_displacements, prefixes::GLOBAL, &keep),
        ),
        (
            "GLOBAL/pile_top_reactions",
            prefix_rows(&table.global.pile_top_reactions, prefixes::GLOBAL, &keep),
        ),
        (
            "LOCAL/pile_top_displacements",
            prefix_rows(&table.local.pile_top_displacements, prefixes::LOCAL, &keep),
        ),
        (
            "LOCAL/pile_top_reactions",
            prefix_rows(&table.local.pile_top_reactions, prefixes::LOCAL, &keep),
        ),
        (
            "LOCAL/lateral_minimum",
            prefix_rows(&table.local.lateral_minimum, prefixes::LOCAL_MIN, &keep),
        ),
        (
            "LOCAL/lateral_maximum",
            prefix_rows(&table.local.lateral_maximum, prefixes::LOCAL_MAX, &keep),
        ),
    ];

    let expected = parts[0].1.len();
    if let Some((name, rows)) = parts.iter().find(|(_, rows)| rows.len() != expected) {
        return Err(SolummaaError::LengthMismatch {
            load_key: load_key.to_string(),
            table: (*name).to_string(),
            expected,
            found: rows.len(),
        });
    }

    let records = (0..expected)
        .map(|index| {
            let mut record = Record::new();
            record.insert(PILE_ID, format!("p{}_{}", index, load_key));
            record.insert(LOAD_ID, load_key);
            record.insert(LOAD_CASE, load.info.load_case.as_str());
            record.insert(CASE_NAME, load.info.case_name.as_str());
            record.insert(LOAD_TYPE, load.info.load_type.as_str());
            for (_, rows) in &parts {
                record.extend(&rows[index]);
            }
            record
        })
        .collect();

    Ok(records)
}

/// Rename every column to `prefix + name`, except those listed in `keep`
pub fn prefix_rows(rows: &[Row], prefix: &str, keep: &[&str]) -> Vec<Row> {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|(key, value)| {
                    let key = if keep.contains(&key.as_str()) {
                        key.clone()
                    } else {
                        format!("{}{}", prefix, key)
                    };
                    (key, value.clone())
                })
                .collect()
        })
        .collect()
}

/// Union of record columns in first-seen order, for a tabular header
pub fn record_columns(records: &[Record]) -> Vec<String> {
    let mut columns: IndexSet<&str> = IndexSet::new();
    for record in records {
        columns.extend(record.keys());
    }
    columns.into_iter().map(str::to_string).collect()
}
