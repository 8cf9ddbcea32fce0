//! JSON Schema validation for rendered hierarchies.
//!
//! Both output formats have a Draft 7 schema embedded at compile time from
//! the `schemas/` directory:
//! - `oncotree-simple.json` - nested name mapping
//! - `oncotree-object.json` - annotated node list
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use oncotree2json::validation::{validate_object, validate_simple};
//!
//! assert!(validate_simple(&json!({"Lung": {"NSCLC": {}}})).is_ok());
//! assert!(validate_object(&json!([{ "name": "Lung" }])).is_err());
//! ```

use serde_json::Value;

use crate::error::{ValidationError, ValidationResult};
use crate::models::OutputFormat;

const SIMPLE_SCHEMA: &str = include_str!("../../schemas/oncotree-simple.json");
const OBJECT_SCHEMA: &str = include_str!("../../schemas/oncotree-object.json");

/// Validate `data` against a parsed JSON schema.
///
/// Returns every validation error message when `data` does not conform.
pub fn validate(schema: &Value, data: &Value) -> ValidationResult<()> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| ValidationError::InvalidSchema(e.to_string()))?;

    let errors: Vec<String> = validator
        .iter_errors(data)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Schema { errors })
    }
}

/// Quick check that returns true/false.
pub fn is_valid(schema: &Value, data: &Value) -> bool {
    jsonschema::draft7::is_valid(schema, data)
}

/// Embedded schema for `format`.
pub fn schema_for(format: OutputFormat) -> ValidationResult<Value> {
    let text = match format {
        OutputFormat::Simple => SIMPLE_SCHEMA,
        OutputFormat::Object => OBJECT_SCHEMA,
    };
    serde_json::from_str(text).map_err(|e| ValidationError::InvalidSchema(e.to_string()))
}

/// Validate against the schema of the given output format.
pub fn validate_format(format: OutputFormat, data: &Value) -> ValidationResult<()> {
    validate(&schema_for(format)?, data)
}

/// Validate a simple (name-only) hierarchy.
pub fn validate_simple(data: &Value) -> ValidationResult<()> {
    validate_format(OutputFormat::Simple, data)
}

/// Validate an object (annotated node) hierarchy.
pub fn validate_object(data: &Value) -> ValidationResult<()> {
    validate_format(OutputFormat::Object, data)
}
