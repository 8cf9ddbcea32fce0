//! Error types for the OncoTree conversion pipeline.
//!
//! - [`CsvError`] - Reading and decoding the tumor type table
//! - [`ValidationError`] - Output schema validation errors
//! - [`ConvertError`] - Top-level conversion errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Table Parsing Errors
// =============================================================================

/// Errors while reading the tab-separated input.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to decode the file contents.
    #[error("Failed to decode input: {0}")]
    Encoding(String),

    /// Malformed record.
    #[error("Invalid table format at line {line}: {message}")]
    Parse { line: u64, message: String },

    /// Empty file.
    #[error("Input file is empty")]
    EmptyFile,

    /// No headers found.
    #[error("No headers found in input")]
    NoHeaders,

    /// A required column is absent from the header row.
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        match err.into_kind() {
            csv::ErrorKind::Io(e) => CsvError::Io(e),
            csv::ErrorKind::Utf8 { err, .. } => CsvError::Encoding(err.to_string()),
            other => CsvError::Parse {
                line,
                message: format!("{:?}", other),
            },
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors while checking a rendered hierarchy against its JSON schema.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Schema validation failed.
    #[error("Validation failed: {errors:?}")]
    Schema { errors: Vec<String> },

    /// The schema itself could not be compiled.
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),
}

// =============================================================================
// Conversion Errors (top-level)
// =============================================================================

/// Top-level conversion errors.
///
/// This is the error type returned by [`crate::pipeline::convert_file`] and
/// surfaced by the CLI.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Input table error.
    #[error("Input error: {0}")]
    Csv(#[from] CsvError),

    /// Output failed schema validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the output failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for table parsing.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result type for conversion.
pub type ConvertResult<T> = Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let csv_err = CsvError::EmptyFile;
        let convert_err: ConvertError = csv_err.into();
        assert!(convert_err.to_string().contains("empty"));

        let csv_err = CsvError::MissingColumn("level_3".into());
        let convert_err: ConvertError = csv_err.into();
        assert!(convert_err.to_string().contains("level_3"));
    }

    #[test]
    fn test_validation_error_format() {
        let err = ValidationError::Schema {
            errors: vec!["\"children\" is a required property".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("children"));
    }

    #[test]
    fn test_parse_error_carries_line() {
        let err = CsvError::Parse {
            line: 7,
            message: "unequal lengths".into(),
        };
        assert!(err.to_string().contains("line 7"));
    }
}
