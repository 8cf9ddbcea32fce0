//! # oncotree2json - OncoTree tumor type table to JSON hierarchy
//!
//! Converts a tab-separated OncoTree export (`level_1` .. `level_7` plus
//! `metamaintype`, `metacolor`, `metanci`, `metaumls`) into one of two JSON
//! representations.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  TSV File   │────▶│   Parser    │────▶│  Hierarchy  │────▶│    JSON     │
//! │  (ISO/UTF8) │     │  (typed)    │     │  (builders) │     │ simple|obj  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use oncotree2json::{convert_file, ConvertOptions, OutputFormat};
//!
//! let options = ConvertOptions { format: OutputFormat::Object, ..Default::default() };
//! let conversion = convert_file("oncotree.txt", &options)?;
//! println!("Built {} nodes", conversion.hierarchy.node_count());
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Rows, hierarchies, output format
//! - [`parser`] - Table parsing with encoding detection
//! - [`hierarchy`] - Path extraction and the two builders
//! - [`validation`] - JSON Schema checks of the output
//! - [`pipeline`] - End-to-end conversion and rendering
//! - [`logs`] - Progress logging to stderr

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Hierarchy construction
pub mod hierarchy;

// Validation
pub mod validation;

// Orchestration
pub mod pipeline;

// Logging
pub mod logs;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ConvertError, CsvError, ValidationError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{LevelPath, ObjectHierarchy, ObjectNode, OutputFormat, Row, SimpleHierarchy};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{decode_content, detect_encoding, parse_bytes, parse_file, parse_rows, ParseResult};

// =============================================================================
// Re-exports - Hierarchy
// =============================================================================

pub use hierarchy::{
    add_child_by_parent_name,
    build_object_hierarchy,
    build_simple_hierarchy,
    row_path,
    BuildReport,
    DroppedRow,
};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{is_valid, validate, validate_format, validate_object, validate_simple};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use pipeline::{
    build_hierarchy,
    convert_bytes,
    convert_file,
    convert_rows,
    render_compact,
    render_pretty,
    write_output,
    Conversion,
    ConversionStats,
    ConvertOptions,
    Hierarchy,
};
