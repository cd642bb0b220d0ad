//! Version-specific load layouts.
//!
//! The v8 and v11/v12 reports store the same logical data in two shapes. The
//! layout is chosen once from the report version and every load case goes
//! through the same two hooks.

use crate::constants::sections::{DATA, DATA_1, DATA_2};
use crate::error::{Result, SolummaaError};
use crate::models::Row;
use crate::parser::{NodeCursor, RawNode};
use crate::version::{ReportLayout, ReportVersion};
use tracing::debug;

/// Normalization hooks that differ between report layouts
pub trait LoadLayout: Send + Sync {
    /// Locate the load group stored under `load_key` at the top level
    fn load_group<'a>(&self, root: &NodeCursor<'a>, load_key: &str) -> Result<NodeCursor<'a>>;

    /// Rows of the local pile-top reactions table
    fn local_pile_top_reactions(&self, table: &NodeCursor<'_>, load_key: &str) -> Result<Vec<Row>>;
}

/// v8: loads stored directly, reactions in one table
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyLoad;

/// v11 and later: loads wrapped in a sequence, reactions split in two tables
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitLoad;

/// Layout implementation for a report version
pub fn layout_for(version: &ReportVersion) -> &'static dyn LoadLayout {
    match version.layout() {
        ReportLayout::Legacy => &LegacyLoad,
        ReportLayout::Modern => &SplitLoad,
    }
}

impl LoadLayout for LegacyLoad {
    fn load_group<'a>(&self, root: &NodeCursor<'a>, load_key: &str) -> Result<NodeCursor<'a>> {
        root.group(load_key)
    }

    fn local_pile_top_reactions(&self, table: &NodeCursor<'_>, _load_key: &str) -> Result<Vec<Row>> {
        Ok(table.rows(DATA)?.to_vec())
    }
}

impl LoadLayout for SplitLoad {
    fn load_group<'a>(&self, root: &NodeCursor<'a>, load_key: &str) -> Result<NodeCursor<'a>> {
        match root.node(load_key)? {
            RawNode::List(items) => {
                let first = items.first().ok_or_else(|| SolummaaError::VersionShapeMismatch {
                    path: root.child_path(load_key),
                    version: root.version().to_string(),
                    expected: "non-empty list",
                    found: "empty list",
                })?;
                if items.len() > 1 {
                    debug!(
                        "{} opened {} times, using the first occurrence",
                        load_key,
                        items.len()
                    );
                }
                Ok(NodeCursor::at(
                    first,
                    format!("{}[0]", root.child_path(load_key)),
                    root.version(),
                ))
            }
            other => Err(root.shape_mismatch(load_key, "list", other)),
        }
    }

    fn local_pile_top_reactions(&self, table: &NodeCursor<'_>, load_key: &str) -> Result<Vec<Row>> {
        let first = table.rows(DATA_1)?;
        let second = table.rows(DATA_2)?;
        if first.len() != second.len() {
            return Err(SolummaaError::LengthMismatch {
                load_key: load_key.to_string(),
                table: table.child_path(DATA_2),
                expected: first.len(),
                found: second.len(),
            });
        }
        Ok(merge_parts(first, second))
    }
}

/// Merge two index-aligned row sequences; on a shared key the second part wins
pub fn merge_parts(first: &[Row], second: &[Row]) -> Vec<Row> {
    first
        .iter()
        .zip(second)
        .enumerate()
        .map(|(index, (a, b))| {
            let mut merged = a.clone();
            for (key, value) in b {
                if let Some(previous) = merged.insert(key.clone(), value.clone()) {
                    if &previous != value {
                        debug!(
                            "Row {}: '{}' differs between parts ({} / {}), keeping the second",
                            index, key, previous, value
                        );
                    }
                }
            }
            merged
        })
        .collect()
}
