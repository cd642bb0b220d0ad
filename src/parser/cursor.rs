//! Path-tracking navigation over the raw parse tree.

use super::{RawGroup, RawNode};
use crate::error::{Result, SolummaaError};
use crate::models::Row;
use crate::version::ReportVersion;

/// Read-only view of a raw group that remembers the path used to reach it,
/// so lookups fail with the full section path
#[derive(Debug, Clone)]
pub struct NodeCursor<'a> {
    group: &'a RawGroup,
    path: String,
    version: &'a ReportVersion,
}

impl<'a> NodeCursor<'a> {
    /// Cursor at the top of a tree
    pub fn root(group: &'a RawGroup, version: &'a ReportVersion) -> Self {
        Self {
            group,
            path: String::new(),
            version,
        }
    }

    /// Cursor at a group reached by other means
    pub fn at(group: &'a RawGroup, path: impl Into<String>, version: &'a ReportVersion) -> Self {
        Self {
            group,
            path: path.into(),
            version,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn version(&self) -> &'a ReportVersion {
        self.version
    }

    pub fn child_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}/{}", self.path, key)
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.group.contains_key(key)
    }

    /// Keys of this group in source order
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.group.keys().map(String::as_str)
    }

    /// Scalar values of this group in source order
    pub fn texts(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.group.values().filter_map(|node| match node {
            RawNode::Text(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn node(&self, key: &str) -> Result<&'a RawNode> {
        self.group
            .get(key)
            .ok_or_else(|| SolummaaError::missing(self.child_path(key)))
    }

    /// Descend into a nested group
    pub fn group(&self, key: &str) -> Result<NodeCursor<'a>> {
        match self.node(key)? {
            RawNode::Group(group) => Ok(Self::at(group, self.child_path(key), self.version)),
            other => Err(self.shape_mismatch(key, "group", other)),
        }
    }

    pub fn rows(&self, key: &str) -> Result<&'a [Row]> {
        match self.node(key)? {
            RawNode::Rows(rows) => Ok(rows),
            other => Err(self.shape_mismatch(key, "rows", other)),
        }
    }

    pub fn text(&self, key: &str) -> Result<&'a str> {
        match self.node(key)? {
            RawNode::Text(text) => Ok(text),
            other => Err(self.shape_mismatch(key, "text", other)),
        }
    }

    /// Error for a node whose shape does not fit this report version
    pub fn shape_mismatch(&self, key: &str, expected: &'static str, found: &RawNode) -> SolummaaError {
        SolummaaError::VersionShapeMismatch {
            path: self.child_path(key),
            version: self.version.to_string(),
            expected,
            found: found.kind(),
        }
    }
}
