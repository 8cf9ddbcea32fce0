//! Domain models for the OncoTree conversion.
//!
//! - [`Row`] - One tumor type record from the input table
//! - [`SimpleHierarchy`] - Nested name-only mapping
//! - [`ObjectNode`] / [`ObjectHierarchy`] - Nested annotated nodes
//! - [`OutputFormat`] - Which of the two representations to produce

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Column Names
// =============================================================================

/// Number of hierarchy levels in an OncoTree table.
pub const LEVEL_COUNT: usize = 7;

/// Hierarchy level columns, shallowest first: `level_1` .. `level_7`.
pub const LEVEL_COLUMNS: [&str; LEVEL_COUNT] = [
    "level_1", "level_2", "level_3", "level_4", "level_5", "level_6", "level_7",
];

/// Per-row metadata columns.
pub const META_COLUMNS: [&str; 4] = ["metamaintype", "metacolor", "metanci", "metaumls"];

/// Every column the input header must contain.
pub fn required_columns() -> impl Iterator<Item = &'static str> {
    LEVEL_COLUMNS.iter().chain(META_COLUMNS.iter()).copied()
}

// =============================================================================
// Input Row
// =============================================================================

/// One record of the tumor type table.
///
/// Empty and NA cells are stored as `None`; other text is kept as written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    /// `level_1` .. `level_7`.
    pub levels: [Option<String>; LEVEL_COUNT],
    pub metamaintype: Option<String>,
    pub metacolor: Option<String>,
    pub metanci: Option<String>,
    pub metaumls: Option<String>,
}

impl Row {
    /// Build a row from its level names, shallowest first. Extra names past
    /// the seventh level are ignored.
    pub fn with_levels<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row = Row::default();
        for (slot, name) in row.levels.iter_mut().zip(names) {
            *slot = Some(name.into());
        }
        row
    }

    /// Attach the four metadata fields.
    pub fn with_meta(
        mut self,
        maintype: Option<&str>,
        color: Option<&str>,
        nci: Option<&str>,
        umls: Option<&str>,
    ) -> Self {
        self.metamaintype = maintype.map(String::from);
        self.metacolor = color.map(String::from);
        self.metanci = nci.map(String::from);
        self.metaumls = umls.map(String::from);
        self
    }
}

/// Ordered category names of one row, shallowest to deepest.
pub type LevelPath = Vec<String>;

// =============================================================================
// Simple Hierarchy
// =============================================================================

/// Name-only hierarchy: each category maps to its sub-categories.
///
/// Serializes as a bare nested JSON object, with `{}` at the leaves. Keys are
/// kept sorted so the result is independent of row order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimpleHierarchy(pub BTreeMap<String, SimpleHierarchy>);

impl SimpleHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Sub-hierarchy for `name`, if present at this level.
    pub fn get(&self, name: &str) -> Option<&SimpleHierarchy> {
        self.0.get(name)
    }

    /// Sub-hierarchy for `name`, created empty if absent.
    pub fn entry(&mut self, name: &str) -> &mut SimpleHierarchy {
        self.0.entry(name.to_string()).or_default()
    }

    /// Total number of nodes below this level.
    pub fn node_count(&self) -> usize {
        self.0.values().map(|child| 1 + child.node_count()).sum()
    }
}

// =============================================================================
// Object Hierarchy
// =============================================================================

/// Annotated tumor type node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectNode {
    pub name: String,
    pub metamaintype: Option<String>,
    pub color: Option<String>,
    pub nci: Option<String>,
    pub umls: Option<String>,
    /// In input row order.
    pub children: Vec<ObjectNode>,
}

impl ObjectNode {
    /// Node named `name` carrying `row`'s metadata, with no children.
    pub fn from_row(name: impl Into<String>, row: &Row) -> Self {
        Self {
            name: name.into(),
            metamaintype: row.metamaintype.clone(),
            color: row.metacolor.clone(),
            nci: row.metanci.clone(),
            umls: row.metaumls.clone(),
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ObjectNode::node_count).sum::<usize>()
    }
}

/// Root nodes of the object hierarchy, in input row order.
pub type ObjectHierarchy = Vec<ObjectNode>;

// =============================================================================
// Output Format
// =============================================================================

/// Output representation selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Nested mapping of category names.
    #[default]
    Simple,
    /// Nested list of annotated nodes.
    Object,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Simple => write!(f, "simple"),
            OutputFormat::Object => write!(f, "object"),
        }
    }
}
