//! Section grammar parser for GPT report text
//!
//! Converts raw report text into a [`RawGroup`] tree in a single
//! left-to-right scan driven by a compiled [`Grammar`]. The tree is purely
//! syntactic: every captured value is kept as the original string.
//!
//! ## Architecture
//!
//! - [`scanner`] - the scope stack that claims lines for grammar rules
//! - [`cursor`] - path-tracking navigation used by the summary builder
//!
//! Missing content is never an error here. Absent sections simply do not
//! appear in the tree and are reported by the consumer that requires them.

pub mod cursor;
pub mod scanner;

pub use cursor::NodeCursor;
pub use scanner::Scanner;

use crate::grammar::Grammar;
use crate::models::Row;
use indexmap::IndexMap;
use serde::Serialize;

/// Mapping from section or field name to node, in source order
pub type RawGroup = IndexMap<String, RawNode>;

/// One node of the raw parse tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawNode {
    /// Scalar capture
    Text(String),
    /// Nested scope
    Group(RawGroup),
    /// Repeated row table
    Rows(Vec<Row>),
    /// Every opening of a `list` section
    List(Vec<RawGroup>),
}

impl RawNode {
    /// Short shape name used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            RawNode::Text(_) => "text",
            RawNode::Group(_) => "group",
            RawNode::Rows(_) => "rows",
            RawNode::List(_) => "list",
        }
    }
}

/// Parse report text into a raw tree
pub fn parse_report(text: &str, grammar: &Grammar) -> RawGroup {
    let mut scanner = Scanner::new(grammar);
    for line in text.lines() {
        scanner.feed(line);
    }
    scanner.finish()
}

#[cfg(test)]
mod tests;
