//! Core data structures for GPT report summaries.
//!
//! Defines the normalized, version-independent [`Summary`] produced by the
//! summary builder and the flat [`Record`] rows derived from it. Serialized
//! key names follow the JSON export layout consumed downstream.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One row of a repeated table, keyed by column name
pub type Row = IndexMap<String, String>;

/// Normalized summary of one report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(rename = "INFO")]
    pub info: DocumentInfo,
    /// Load summaries keyed by load key, in `info.load_keys` order
    #[serde(rename = "LOAD")]
    pub loads: IndexMap<String, LoadSummary>,
}

/// Document-level metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub group_version: String,
    pub datetime: String,
    pub computation_name: String,
    /// Load section names in source order
    pub load_keys: Vec<String>,
    pub total_load_case: usize,
    pub total_pile: usize,
}

/// Everything extracted for one load case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadSummary {
    #[serde(rename = "INFO_LOAD")]
    pub info: InfoLoad,
    #[serde(rename = "INFO_COMPUTATION")]
    pub computation: InfoComputation,
    #[serde(rename = "TABLE")]
    pub table: LoadTables,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoLoad {
    /// Suffix of the load key after `LOAD_`
    pub load_case: String,
    pub case_name: String,
    pub load_type: String,
    pub total_pile: usize,
}

/// Equivalent loads and resulting displacement at the pile cap origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoComputation {
    #[serde(rename = "LOAD")]
    pub load: ComputedLoad,
    #[serde(rename = "DISPLACEMENT")]
    pub displacement: ComputedDisplacement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedLoad {
    pub load_vertical: f64,
    pub load_horizontal_y: f64,
    pub load_horizontal_z: f64,
    pub moment_x: f64,
    pub moment_y: f64,
    pub moment_z: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedDisplacement {
    pub vertical: f64,
    pub horizontal_y: f64,
    pub horizontal_z: f64,
    pub angle_rotation_x: f64,
    pub angle_rotation_y: f64,
    pub angle_rotation_z: f64,
}

/// Per-pile tables of one load case; row `i` of every table is the same pile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadTables {
    pub reduction_factor: Vec<Row>,
    #[serde(rename = "GLOBAL")]
    pub global: GlobalTables,
    #[serde(rename = "LOCAL")]
    pub local: LocalTables,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalTables {
    pub pile_top_displacements: Vec<Row>,
    pub pile_top_reactions: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalTables {
    pub pile_top_displacements: Vec<Row>,
    pub pile_top_reactions: Vec<Row>,
    pub lateral_minimum: Vec<Row>,
    pub lateral_maximum: Vec<Row>,
}

/// One flattened row: a single pile under a single load case
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, String>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column, replacing any earlier value under the same key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Merge a row into the record; later keys overwrite earlier ones
    pub fn extend(&mut self, row: &Row) {
        for (key, value) in row {
            self.0.insert(key.clone(), value.clone());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Column names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn pile_id(&self) -> Option<&str> {
        self.get(crate::constants::record_columns::PILE_ID)
    }
}

impl Summary {
    /// Load summaries in `load_keys` order
    pub fn loads_in_order(&self) -> impl Iterator<Item = (&str, Option<&LoadSummary>)> {
        self.info
            .load_keys
            .iter()
            .map(|key| (key.as_str(), self.loads.get(key)))
    }
}

/// Outcome of a batch conversion
#[derive(Debug, Clone, Default)]
pub struct ProcessingStats {
    pub files_processed: usize,
    pub files_failed: usize,
    pub total_records: usize,
    /// Every file written, in completion order
    pub outputs: Vec<PathBuf>,
    /// Failed inputs with the error that stopped them
    pub failures: Vec<(PathBuf, String)>,
    pub processing_time_ms: u128,
}
