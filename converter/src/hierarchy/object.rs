//! Annotated node hierarchy builder.
//!
//! Nodes are created in row order. A row with a single level becomes a new
//! root; a deeper row becomes a child of the first node, in depth-first
//! pre-order, whose name equals the row's second-to-last level.
//!
//! Rows whose parent has not been created yet are dropped without error. Each
//! insertion rescans the tree from the roots, with no name index.

use super::path::row_path;
use crate::models::{ObjectHierarchy, ObjectNode, Row};

/// A row that could not be attached because its parent was not found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRow {
    /// 1-based position among the data rows.
    pub row: usize,
    pub name: String,
    pub parent: String,
}

/// What happened to each input row during an object build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub rows_read: usize,
    /// Nodes created, roots included.
    pub nodes_added: usize,
    pub roots: usize,
    /// Rows skipped because `level_1` was empty.
    pub empty_paths: usize,
    pub dropped: Vec<DroppedRow>,
}

/// First node named `name`, searching depth-first in pre-order.
pub fn find_by_name_mut<'a>(nodes: &'a mut [ObjectNode], name: &str) -> Option<&'a mut ObjectNode> {
    for node in nodes {
        if node.name == name {
            return Some(node);
        }
        if let Some(found) = find_by_name_mut(&mut node.children, name) {
            return Some(found);
        }
    }
    None
}

/// Append `child` to the first node named `parent_name`.
///
/// Returns `false`, leaving the hierarchy untouched, when no such node exists.
pub fn add_child_by_parent_name(
    hierarchy: &mut [ObjectNode],
    parent_name: &str,
    child: ObjectNode,
) -> bool {
    match find_by_name_mut(hierarchy, parent_name) {
        Some(parent) => {
            parent.children.push(child);
            true
        }
        None => false,
    }
}

/// Build the annotated hierarchy from rows in input order.
pub fn build_object_hierarchy(rows: &[Row]) -> (ObjectHierarchy, BuildReport) {
    let mut hierarchy = ObjectHierarchy::new();
    let mut report = BuildReport {
        rows_read: rows.len(),
        ..Default::default()
    };

    for (i, row) in rows.iter().enumerate() {
        let path = row_path(row);
        match path.as_slice() {
            [] => report.empty_paths += 1,
            [root] => {
                hierarchy.push(ObjectNode::from_row(root.as_str(), row));
                report.roots += 1;
                report.nodes_added += 1;
            }
            [.., parent, name] => {
                let node = ObjectNode::from_row(name.as_str(), row);
                if add_child_by_parent_name(&mut hierarchy, parent, node) {
                    report.nodes_added += 1;
                } else {
                    report.dropped.push(DroppedRow {
                        row: i + 1,
                        name: name.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }
    }

    (hierarchy, report)
}
