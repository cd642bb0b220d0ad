//! Report version resolution from file naming conventions.
//!
//! GROUP writes its text reports with an extension of the shape
//! `.gp<digits>t`, so the version is known before any content is read.

use crate::constants::LAST_LEGACY_VERSION;
use crate::error::{Result, SolummaaError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

static EXTENSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^gp(\d+)t$").expect("static version pattern"));

/// Structural family of a report version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportLayout {
    /// v8: load sections stored directly, single local reaction table
    Legacy,
    /// v11, v12: load sections wrapped in a sequence, local reactions split in two
    Modern,
}

impl ReportLayout {
    /// Tag used by grammar rules gated on this layout
    pub fn tag(&self) -> &'static str {
        match self {
            ReportLayout::Legacy => "legacy",
            ReportLayout::Modern => "modern",
        }
    }
}

/// Version of a GPT report, e.g. `v12`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportVersion {
    number: u32,
    tag: String,
}

impl ReportVersion {
    /// Build a version from its numeral
    pub fn new(number: u32) -> Self {
        Self {
            number,
            tag: format!("v{}", number),
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    /// Version tag, `"v"` followed by the digits as written in the file name
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn layout(&self) -> ReportLayout {
        if self.number <= LAST_LEGACY_VERSION {
            ReportLayout::Legacy
        } else {
            ReportLayout::Modern
        }
    }

    /// Whether a grammar tag (version tag or layout name) selects this version.
    ///
    /// `v08` and `v8` both select version 8.
    pub fn matches_tag(&self, tag: &str) -> bool {
        if tag.eq_ignore_ascii_case(&self.tag) || tag.eq_ignore_ascii_case(self.layout().tag()) {
            return true;
        }
        tag.strip_prefix(['v', 'V'])
            .and_then(|digits| digits.parse::<u32>().ok())
            .is_some_and(|number| number == self.number)
    }
}

impl fmt::Display for ReportVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

/// Resolve the report version from a file path, file name or bare extension
pub fn resolve_version(filename: impl AsRef<Path>) -> Result<ReportVersion> {
    let path = filename.as_ref();
    let unrecognized = || SolummaaError::UnrecognizedVersion {
        filename: path.display().to_string(),
    };

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(unrecognized)?;

    let extension = match name.rsplit_once('.') {
        Some((_, ext)) => ext,
        None => name,
    };

    let digits = EXTENSION_PATTERN
        .captures(extension)
        .and_then(|c| c.get(1))
        .ok_or_else(unrecognized)?;

    let number = digits.as_str().parse::<u32>().map_err(|_| unrecognized())?;
    Ok(ReportVersion {
        number,
        tag: format!("v{}", digits.as_str()),
    })
}
