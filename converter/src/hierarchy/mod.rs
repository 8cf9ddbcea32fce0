//! Tumor type hierarchy construction.
//!
//! - Path: row to ordered chain of level names
//! - Simple: name-only nested mapping
//! - Object: nested annotated nodes with parent lookup by name

pub mod object;
pub mod path;
pub mod simple;

pub use object::{add_child_by_parent_name, build_object_hierarchy, BuildReport, DroppedRow};
pub use path::row_path;
pub use simple::build_simple_hierarchy;
