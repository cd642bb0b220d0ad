//! Application constants for the GPT report pipeline
//!
//! Section names emitted by the shipped grammar, record column prefixes and
//! output naming conventions used throughout the crate.

// =============================================================================
// Raw Parse Tree Section Names
// =============================================================================

/// Top-level and per-load section names produced by the shipped grammar
pub mod sections {
    pub const HEADER_VERSION: &str = "HEADER_VERSION";
    pub const HEADER_DATETIME: &str = "HEADER_DATETIME";
    pub const HEADER_COMPUTATION: &str = "HEADER_COMPUTATION";

    /// Substring identifying load case sections at the top level
    pub const LOAD_MARKER: &str = "LOAD";
    /// Prefix stripped from a load key to derive its case id
    pub const LOAD_PREFIX: &str = "LOAD_";

    pub const INFO: &str = "INFO";
    pub const INFO_COMPUTATION: &str = "INFO_COMPUTATION";
    pub const EQUIVALENT_1: &str = "EQUIVALENT_1";
    pub const EQUIVALENT_2: &str = "EQUIVALENT_2";
    pub const DISPLACEMENT_1: &str = "DISPLACEMENT_1";
    pub const DISPLACEMENT_2: &str = "DISPLACEMENT_2";

    pub const TABLE_REDUCTION_FACTOR: &str = "TABLE_REDUCTION_FACTOR";
    pub const GLOBAL_COORDINATE: &str = "GLOBAL_COORDINATE";
    pub const TABLE_GLOBAL_PILE_TOP_DISPLACEMENTS: &str = "TABLE_GLOBAL_PILE_TOP_DISPLACEMENTS";
    pub const TABLE_GLOBAL_PILE_TOP_REACTIONS: &str = "TABLE_GLOBAL_PILE_TOP_REACTIONS";
    pub const LOCAL_COORDINATE: &str = "LOCAL_COORDINATE";
    pub const TABLE_LOCAL_PILE_TOP_DISPLACEMENTS: &str = "TABLE_LOCAL_PILE_TOP_DISPLACEMENTS";
    pub const TABLE_LOCAL_PILE_TOP_REACTIONS: &str = "TABLE_LOCAL_PILE_TOP_REACTIONS";
    pub const TABLE_LOCAL_LATERAL_MINIMUM: &str = "TABLE_LOCAL_LATERAL_MINIMUM";
    pub const TABLE_LOCAL_LATERAL_MAXIMUM: &str = "TABLE_LOCAL_LATERAL_MAXIMUM";

    /// Row table of a single-part section
    pub const DATA: &str = "DATA";
    /// First and second halves of a split table (v11 and later)
    pub const DATA_1: &str = "DATA_1";
    pub const DATA_2: &str = "DATA_2";
}

/// Raw field names captured by the shipped grammar
pub mod fields {
    pub const GROUP_VERSION: &str = "group_version";
    pub const COMPUTATION_NAME: &str = "comp_name";
    pub const CASE_NAME: &str = "case_name";
    pub const LOAD_TYPE: &str = "load_type";
}

/// Group version reported when the header carries none (v8)
pub const GROUP_VERSION_UNAVAILABLE: &str = "N/A";

// =============================================================================
// Record Flattening
// =============================================================================

/// Column passed through unprefixed so records can be grouped downstream
pub const GROUPING_KEY: &str = "pile_group";

/// Column prefixes applied per sub-table when flattening
pub mod prefixes {
    pub const GLOBAL: &str = "global_";
    pub const LOCAL: &str = "local_";
    pub const LOCAL_MIN: &str = "local_min_";
    pub const LOCAL_MAX: &str = "local_max_";
}

/// Identity columns leading every record
pub mod record_columns {
    pub const PILE_ID: &str = "pile_id";
    pub const LOAD_ID: &str = "load_id";
    pub const LOAD_CASE: &str = "load_case";
    pub const CASE_NAME: &str = "case_name";
    pub const LOAD_TYPE: &str = "load_type";
}

// =============================================================================
// Versions and File Naming
// =============================================================================

/// Highest report version using the single-table legacy layout
pub const LAST_LEGACY_VERSION: u32 = 8;

/// Archive extension accepted as a report container
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Output file suffixes, appended to the input file stem
pub const SUMMARY_JSON_SUFFIX: &str = "_summary.json";
pub const RECORDS_JSON_SUFFIX: &str = "_records.json";
pub const RECORDS_CSV_SUFFIX: &str = "_records.csv";

/// Environment filter target used by the binary's logging setup
pub const LOG_TARGET: &str = "solummaa";
