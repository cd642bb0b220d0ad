//! Declarative grammar for GPT report sections
//!
//! A grammar is a text artifact describing which lines open sections, which
//! lines bind scalar fields and which lines repeat as table rows. It is
//! compiled once per report version: rules tagged for other versions are
//! dropped at load time, so the scanner in [`crate::parser`] never branches on
//! versions.
//!
//! ## Components
//!
//! - [`pattern`] - line templates with `{{name:kind}}` placeholders
//! - [`definition`] - loader for the grammar text format
//!
//! The shipped grammar lives in `gpt.grammar` next to this module.

pub mod definition;
pub mod pattern;

pub use pattern::{CaptureKind, LinePattern};

use crate::error::Result;
use crate::version::ReportVersion;
use tracing::debug;

/// Grammar text shipped with the crate
pub const GPT_GRAMMAR: &str = include_str!("gpt.grammar");

/// A grammar compiled for one report version
#[derive(Debug, Clone)]
pub struct Grammar {
    rules: Vec<Rule>,
}

impl Grammar {
    /// Compile grammar text for the given version
    pub fn parse(text: &str, version: &ReportVersion) -> Result<Self> {
        let rules = definition::parse_rules(text, version)?;
        debug!(
            "Compiled grammar for {} with {} top-level rules",
            version,
            rules.len()
        );
        Ok(Self { rules })
    }

    /// The shipped GPT grammar for the given version
    pub fn builtin(version: &ReportVersion) -> Result<Self> {
        Self::parse(GPT_GRAMMAR, version)
    }

    /// Rules active at the top level of a report
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

/// One grammar rule inside a scope
#[derive(Debug, Clone)]
pub enum Rule {
    /// Scalar binding into the enclosing scope
    Field(LinePattern),
    Section(SectionRule),
    Table(TableRule),
}

/// Named group opened by a header line
#[derive(Debug, Clone)]
pub struct SectionRule {
    pub name: NameTemplate,
    pub start: LinePattern,
    pub stop: Option<LinePattern>,
    /// Store each opening as a new element of a sequence
    pub list: bool,
    pub rules: Vec<Rule>,
}

/// Repeated row group
#[derive(Debug, Clone)]
pub struct TableRule {
    pub name: String,
    /// Header line opening the table; rows match directly in the parent scope without one
    pub start: Option<LinePattern>,
    pub row: LinePattern,
}

/// Section name, optionally filled from start-line captures (`LOAD_{{case}}`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTemplate {
    parts: Vec<NamePart>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NamePart {
    Literal(String),
    Capture(String),
}

impl NameTemplate {
    pub fn parse(template: &str) -> std::result::Result<Self, String> {
        let mut parts = Vec::new();
        let mut rest = template;
        while let Some(open) = rest.find("{{") {
            if open > 0 {
                parts.push(NamePart::Literal(rest[..open].to_string()));
            }
            let after = &rest[open + 2..];
            let close = after
                .find("}}")
                .ok_or_else(|| format!("unclosed placeholder in name '{}'", template))?;
            let capture = after[..close].trim();
            if capture.is_empty() {
                return Err(format!("empty placeholder in name '{}'", template));
            }
            parts.push(NamePart::Capture(capture.to_string()));
            rest = &after[close + 2..];
        }
        if !rest.is_empty() {
            parts.push(NamePart::Literal(rest.to_string()));
        }
        if parts.is_empty() {
            return Err("empty section name".to_string());
        }
        Ok(Self { parts })
    }

    /// Capture names referenced by the template
    pub fn captures(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().filter_map(|p| match p {
            NamePart::Capture(name) => Some(name.as_str()),
            NamePart::Literal(_) => None,
        })
    }

    /// Render the name from start-line captures; unknown captures render empty
    pub fn render(&self, captures: &[(String, String)]) -> String {
        self.parts
            .iter()
            .map(|p| match p {
                NamePart::Literal(text) => text.as_str(),
                NamePart::Capture(name) => captures
                    .iter()
                    .find(|(k, _)| k == name)
                    .map(|(_, v)| v.as_str())
                    .unwrap_or(""),
            })
            .collect()
    }
}
