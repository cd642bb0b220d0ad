//! Summary builder: raw parse tree to normalized [`Summary`]
//!
//! Walks the raw tree produced by [`crate::parser`], resolves the
//! version-specific layout once through [`layout::layout_for`], coerces the
//! computation results to floating point and assembles one
//! [`LoadSummary`] per load case.
//!
//! ## Usage
//!
//! ```rust
//! use solummaa::grammar::Grammar;
//! use solummaa::parser::parse_report;
//! use solummaa::summary::{build_summary, BuildOptions};
//! use solummaa::version::resolve_version;
//!
//! # fn example(text: &str) -> solummaa::error::Result<()> {
//! let version = resolve_version("pier.gp12t")?;
//! let grammar = Grammar::builtin(&version)?;
//! let raw = parse_report(text, &grammar);
//! let summary = build_summary(&raw, &version, &BuildOptions::default())?;
//! println!("{} load cases", summary.info.total_load_case);
//! # Ok(())
//! # }
//! ```

pub mod layout;

pub use layout::{LegacyLoad, LoadLayout, SplitLoad, layout_for, merge_parts};

use crate::constants::sections::*;
use crate::constants::{GROUP_VERSION_UNAVAILABLE, fields};
use crate::error::{Result, SolummaaError};
use crate::models::{
    ComputedDisplacement, ComputedLoad, DocumentInfo, GlobalTables, InfoComputation, InfoLoad,
    LoadSummary, LoadTables, LocalTables, Summary,
};
use crate::parser::{NodeCursor, RawGroup};
use crate::version::ReportVersion;
use indexmap::IndexMap;
use tracing::{debug, warn};

/// Options controlling summary validation
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Fail when load cases disagree on their pile count instead of warning
    pub strict_pile_count: bool,
}

/// Build the normalized summary of one report
pub fn build_summary(
    raw: &RawGroup,
    version: &ReportVersion,
    options: &BuildOptions,
) -> Result<Summary> {
    let root = NodeCursor::root(raw, version);
    let layout = layout_for(version);

    let group_version = if root.contains(HEADER_VERSION) {
        root.group(HEADER_VERSION)?
            .text(fields::GROUP_VERSION)?
            .to_string()
    } else {
        GROUP_VERSION_UNAVAILABLE.to_string()
    };

    let datetime = root
        .group(HEADER_DATETIME)?
        .texts()
        .collect::<Vec<_>>()
        .join(" ");

    let computation_name = root
        .group(HEADER_COMPUTATION)?
        .text(fields::COMPUTATION_NAME)?
        .to_string();

    let load_keys: Vec<String> = root
        .keys()
        .filter(|key| key.contains(LOAD_MARKER))
        .map(str::to_string)
        .collect();

    if load_keys.is_empty() {
        return Err(SolummaaError::missing(format!("{}*", LOAD_PREFIX)));
    }

    let mut loads = IndexMap::with_capacity(load_keys.len());
    for load_key in &load_keys {
        let load = build_load(&root, layout, load_key)?;
        debug!(
            "Built {} ({} piles, case '{}')",
            load_key, load.info.total_pile, load.info.case_name
        );
        loads.insert(load_key.clone(), load);
    }

    let total_pile = document_pile_count(&loads, options)?;

    Ok(Summary {
        info: DocumentInfo {
            group_version,
            datetime,
            computation_name,
            total_load_case: load_keys.len(),
            load_keys,
            total_pile,
        },
        loads,
    })
}

/// Document pile count, taken from the last load case
fn document_pile_count(
    loads: &IndexMap<String, LoadSummary>,
    options: &BuildOptions,
) -> Result<usize> {
    let Some((_, last)) = loads.last() else {
        return Ok(0);
    };
    let expected = last.info.total_pile;

    for (load_key, load) in loads {
        if load.info.total_pile == expected {
            continue;
        }
        if options.strict_pile_count {
            return Err(SolummaaError::NonUniformPileCount {
                load_key: load_key.clone(),
                expected,
                found: load.info.total_pile,
            });
        }
        warn!(
            "{} has {} piles but the document reports {}",
            load_key, load.info.total_pile, expected
        );
    }
    Ok(expected)
}

/// Build one load case
pub fn build_load(
    root: &NodeCursor<'_>,
    layout: &dyn LoadLayout,
    load_key: &str,
) -> Result<LoadSummary> {
    let load = layout.load_group(root, load_key)?;

    let info = load.group(INFO)?;
    let load_case = load_key
        .rsplit(LOAD_PREFIX)
        .next()
        .unwrap_or(load_key)
        .to_string();

    let computation = build_computation(&load.group(INFO_COMPUTATION)?, load_key)?;

    let reduction_factor = load.group(TABLE_REDUCTION_FACTOR)?.rows(DATA)?.to_vec();

    let global = load.group(GLOBAL_COORDINATE)?;
    let global = GlobalTables {
        pile_top_displacements: global
            .group(TABLE_GLOBAL_PILE_TOP_DISPLACEMENTS)?
            .rows(DATA)?
            .to_vec(),
        pile_top_reactions: global
            .group(TABLE_GLOBAL_PILE_TOP_REACTIONS)?
            .rows(DATA)?
            .to_vec(),
    };

    let local = load.group(LOCAL_COORDINATE)?;
    let local = LocalTables {
        pile_top_displacements: local
            .group(TABLE_LOCAL_PILE_TOP_DISPLACEMENTS)?
            .rows(DATA)?
            .to_vec(),
        pile_top_reactions: layout.local_pile_top_reactions(
            &local.group(TABLE_LOCAL_PILE_TOP_REACTIONS)?,
            load_key,
        )?,
        lateral_minimum: local.group(TABLE_LOCAL_LATERAL_MINIMUM)?.rows(DATA)?.to_vec(),
        lateral_maximum: local.group(TABLE_LOCAL_LATERAL_MAXIMUM)?.rows(DATA)?.to_vec(),
    };

    Ok(LoadSummary {
        info: InfoLoad {
            load_case,
            case_name: info.text(fields::CASE_NAME)?.to_string(),
            load_type: info.text(fields::LOAD_TYPE)?.to_string(),
            total_pile: reduction_factor.len(),
        },
        computation,
        table: LoadTables {
            reduction_factor,
            global,
            local,
        },
    })
}

fn build_computation(computation: &NodeCursor<'_>, load_key: &str) -> Result<InfoComputation> {
    let equivalent_1 = computation.group(EQUIVALENT_1)?;
    let equivalent_2 = computation.group(EQUIVALENT_2)?;
    let displacement_1 = computation.group(DISPLACEMENT_1)?;
    let displacement_2 = computation.group(DISPLACEMENT_2)?;

    let number = |section: &NodeCursor<'_>, field: &str| -> Result<f64> {
        coerce_number(section.text(field)?, load_key, section.path(), field)
    };

    Ok(InfoComputation {
        load: ComputedLoad {
            load_vertical: number(&equivalent_1, "load_vert")?,
            load_horizontal_y: number(&equivalent_1, "load_hor_y")?,
            load_horizontal_z: number(&equivalent_1, "load_hor_z")?,
            moment_x: number(&equivalent_2, "mom_x")?,
            moment_y: number(&equivalent_2, "mom_y")?,
            moment_z: number(&equivalent_2, "mom_z")?,
        },
        displacement: ComputedDisplacement {
            vertical: number(&displacement_1, "disp_vert")?,
            horizontal_y: number(&displacement_1, "disp_hor_y")?,
            horizontal_z: number(&displacement_1, "disp_hor_z")?,
            angle_rotation_x: number(&displacement_2, "rot_x")?,
            angle_rotation_y: number(&displacement_2, "rot_y")?,
            angle_rotation_z: number(&displacement_2, "rot_z")?,
        },
    })
}

/// Coerce a captured value to `f64`, accepting Fortran `D` exponents
pub fn coerce_number(value: &str, load_key: &str, section: &str, field: &str) -> Result<f64> {
    let trimmed = value.trim();
    trimmed
        .parse::<f64>()
        .or_else(|_| trimmed.replace(['D', 'd'], "E").parse::<f64>())
        .map_err(|_| SolummaaError::NumericCoercion {
            load_key: load_key.to_string(),
            section: section.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
pub mod tests;
