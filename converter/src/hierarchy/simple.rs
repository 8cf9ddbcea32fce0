//! Name-only hierarchy builder.

use super::path::row_path;
use crate::models::{Row, SimpleHierarchy};

/// Fold every row path of two or more levels into a nested mapping.
///
/// Single-level rows contribute nothing on their own; a root category only
/// shows up when some deeper row passes through it. Keys merge per position,
/// so the result depends only on the set of paths.
pub fn build_simple_hierarchy(rows: &[Row]) -> SimpleHierarchy {
    let mut hierarchy = SimpleHierarchy::new();

    for path in rows.iter().map(row_path).filter(|p| p.len() > 1) {
        let mut current = &mut hierarchy;
        for name in &path {
            current = current.entry(name);
        }
    }

    hierarchy
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(paths: &[&[&str]]) -> Vec<Row> {
        paths.iter().map(|p| Row::with_levels(p.iter().copied())).collect()
    }

    #[test]
    fn test_root_appears_through_prefix() {
        let tree = build_simple_hierarchy(&rows(&[&["A"], &["A", "B"]]));
        assert_eq!(serde_json::to_value(&tree).unwrap(), json!({"A": {"B": {}}}));
    }

    #[test]
    fn test_lone_root_is_invisible() {
        let tree = build_simple_hierarchy(&rows(&[&["Lonely"], &["A", "B"]]));
        assert!(tree.get("Lonely").is_none());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_same_name_under_different_parents_stays_distinct() {
        let tree = build_simple_hierarchy(&rows(&[&["A", "Other"], &["B", "Other"]]));
        assert!(tree.get("A").unwrap().get("Other").is_some());
        assert!(tree.get("B").unwrap().get("Other").is_some());
        assert_eq!(tree.node_count(), 4);
    }

    #[test]
    fn test_shared_prefixes_merge() {
        let tree = build_simple_hierarchy(&rows(&[
            &["Lung", "NSCLC", "LUAD"],
            &["Lung", "NSCLC", "LUSC"],
            &["Lung", "SCLC"],
        ]));
        assert_eq!(
            serde_json::to_value(&tree).unwrap(),
            json!({"Lung": {"NSCLC": {"LUAD": {}, "LUSC": {}}, "SCLC": {}}})
        );
    }

    #[test]
    fn test_row_order_does_not_matter() {
        let forward = rows(&[&["A", "B"], &["A", "C", "D"], &["E", "F"], &["A", "B", "G"]]);
        let mut reversed = forward.clone();
        reversed.reverse();
        let mut rotated = forward.clone();
        rotated.rotate_left(2);

        let expected = build_simple_hierarchy(&forward);
        assert_eq!(build_simple_hierarchy(&reversed), expected);
        assert_eq!(build_simple_hierarchy(&rotated), expected);
        assert_eq!(
            serde_json::to_string(&build_simple_hierarchy(&reversed)).unwrap(),
            serde_json::to_string(&expected).unwrap()
        );
    }

    #[test]
    fn test_empty_input() {
        let tree = build_simple_hierarchy(&[]);
        assert_eq!(serde_json::to_string(&tree).unwrap(), "{}");
    }

    #[test]
    fn test_json_round_trip() {
        let tree = build_simple_hierarchy(&rows(&[&["A", "B", "C"], &["A", "D"]]));
        let text = serde_json::to_string(&tree).unwrap();
        let parsed: SimpleHierarchy = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, tree);
    }
}
