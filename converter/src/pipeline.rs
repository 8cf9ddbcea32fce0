//! High-level conversion API: table file in, JSON hierarchy out.
//!
//! # Example
//!
//! ```rust,ignore
//! use oncotree2json::pipeline::{convert_file, write_output, ConvertOptions};
//! use oncotree2json::OutputFormat;
//!
//! let options = ConvertOptions { format: OutputFormat::Object, ..Default::default() };
//! let conversion = convert_file("oncotree.txt", &options)?;
//! write_output(&conversion.hierarchy, None)?;
//! ```

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::path::Path;

use crate::error::ConvertResult;
use crate::hierarchy::{build_object_hierarchy, build_simple_hierarchy, row_path, DroppedRow};
use crate::logs::{log_info, log_info_indent, log_warning, log_warning_indent};
use crate::models::{ObjectHierarchy, OutputFormat, Row, SimpleHierarchy};
use crate::parser::{parse_bytes, ParseResult, DEFAULT_DELIMITER};
use crate::validation::validate_format;

/// Indentation used when printing to stdout.
pub const PRETTY_INDENT: &[u8] = b"    ";

/// How many dropped rows are listed individually in the log.
const MAX_LOGGED_DROPS: usize = 5;

/// Options for a conversion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Output representation
    pub format: OutputFormat,
    /// Field separator of the input table
    pub delimiter: char,
    /// Check the built hierarchy against its JSON schema
    pub validate: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Simple,
            delimiter: DEFAULT_DELIMITER,
            validate: false,
        }
    }
}

/// A built hierarchy in either output representation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Hierarchy {
    Simple(SimpleHierarchy),
    Object(ObjectHierarchy),
}

impl Hierarchy {
    pub fn format(&self) -> OutputFormat {
        match self {
            Hierarchy::Simple(_) => OutputFormat::Simple,
            Hierarchy::Object(_) => OutputFormat::Object,
        }
    }

    /// Number of nodes in the whole hierarchy.
    pub fn node_count(&self) -> usize {
        match self {
            Hierarchy::Simple(tree) => tree.node_count(),
            Hierarchy::Object(roots) => roots.iter().map(|n| n.node_count()).sum(),
        }
    }

    pub fn to_value(&self) -> ConvertResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Row accounting for one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionStats {
    pub rows: usize,
    pub nodes: usize,
    pub roots: usize,
    /// Rows that contributed nothing: empty paths, and single-level rows in
    /// the simple format.
    pub skipped: usize,
    /// Object format only: rows whose parent was not found.
    pub dropped: Vec<DroppedRow>,
}

/// Input table details
#[derive(Debug, Clone)]
pub struct InputInfo {
    pub encoding: String,
    pub delimiter: char,
    pub row_count: usize,
    pub headers: Vec<String>,
}

impl From<&ParseResult> for InputInfo {
    fn from(parsed: &ParseResult) -> Self {
        Self {
            encoding: parsed.encoding.clone(),
            delimiter: parsed.delimiter,
            row_count: parsed.rows.len(),
            headers: parsed.headers.clone(),
        }
    }
}

/// Result of a full conversion
#[derive(Debug, Clone)]
pub struct Conversion {
    pub hierarchy: Hierarchy,
    pub stats: ConversionStats,
    pub input: InputInfo,
}

/// Build the hierarchy for `format` from parsed rows.
pub fn build_hierarchy(rows: &[Row], format: OutputFormat) -> (Hierarchy, ConversionStats) {
    match format {
        OutputFormat::Simple => {
            let tree = build_simple_hierarchy(rows);
            let stats = ConversionStats {
                rows: rows.len(),
                nodes: tree.node_count(),
                roots: tree.len(),
                skipped: rows.iter().filter(|r| row_path(r).len() <= 1).count(),
                dropped: Vec::new(),
            };
            (Hierarchy::Simple(tree), stats)
        }
        OutputFormat::Object => {
            let (roots, report) = build_object_hierarchy(rows);
            let stats = ConversionStats {
                rows: report.rows_read,
                nodes: report.nodes_added,
                roots: report.roots,
                skipped: report.empty_paths,
                dropped: report.dropped,
            };
            (Hierarchy::Object(roots), stats)
        }
    }
}

/// Build, and validate if requested, from already parsed rows.
pub fn convert_rows(rows: &[Row], options: &ConvertOptions) -> ConvertResult<(Hierarchy, ConversionStats)> {
    let (hierarchy, stats) = build_hierarchy(rows, options.format);

    if options.validate {
        validate_format(options.format, &hierarchy.to_value()?)?;
    }

    Ok((hierarchy, stats))
}

/// Convert raw table bytes.
pub fn convert_bytes(bytes: &[u8], options: &ConvertOptions) -> ConvertResult<Conversion> {
    let parsed = parse_bytes(bytes, options.delimiter)?;
    let input = InputInfo::from(&parsed);

    log_info(format!("Encoding: {}", input.encoding));
    log_info(format!("Rows: {}", input.row_count));

    let (hierarchy, stats) = convert_rows(&parsed.rows, options)?;
    log_conversion(&hierarchy, &stats, options);

    Ok(Conversion { hierarchy, stats, input })
}

/// Read and convert a table file.
pub fn convert_file<P: AsRef<Path>>(path: P, options: &ConvertOptions) -> ConvertResult<Conversion> {
    let bytes = std::fs::read(path.as_ref()).map_err(crate::error::CsvError::from)?;
    convert_bytes(&bytes, options)
}

fn log_conversion(hierarchy: &Hierarchy, stats: &ConversionStats, options: &ConvertOptions) {
    log_info(format!(
        "Built {} hierarchy: {} nodes, {} roots",
        hierarchy.format(),
        stats.nodes,
        stats.roots
    ));
    if stats.skipped > 0 {
        log_info_indent(format!("{} rows contributed no node", stats.skipped), 1);
    }
    if !stats.dropped.is_empty() {
        log_warning(format!(
            "{} rows dropped: parent not found above them",
            stats.dropped.len()
        ));
        for dropped in stats.dropped.iter().take(MAX_LOGGED_DROPS) {
            log_warning_indent(
                format!("row {}: '{}' (parent '{}')", dropped.row, dropped.name, dropped.parent),
                1,
            );
        }
    }
    if options.validate {
        log_info("Schema validation passed");
    }
}

/// Serialize with a 4-space indent.
pub fn render_pretty(hierarchy: &Hierarchy) -> ConvertResult<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(PRETTY_INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    hierarchy.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Serialize without whitespace.
pub fn render_compact(hierarchy: &Hierarchy) -> ConvertResult<String> {
    Ok(serde_json::to_string(hierarchy)?)
}

/// Write compact JSON to `path`, or pretty JSON to stdout when `path` is `None`.
///
/// The whole document is rendered before anything is written.
pub fn write_output(hierarchy: &Hierarchy, path: Option<&Path>) -> ConvertResult<()> {
    match path {
        Some(p) => {
            let json = render_compact(hierarchy)?;
            std::fs::write(p, json)?;
            log_info(format!("Output written to: {}", p.display()));
        }
        None => {
            let json = render_pretty(hierarchy)?;
            println!("{}", json);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConvertError, CsvError, ValidationError};
    use serde_json::json;

    const HEADER: &str = "level_1\tlevel_2\tlevel_3\tlevel_4\tlevel_5\tlevel_6\tlevel_7\tmetamaintype\tmetacolor\tmetanci\tmetaumls";

    fn table(lines: &[&str]) -> String {
        std::iter::once(HEADER)
            .chain(lines.iter().copied())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn object_options() -> ConvertOptions {
        ConvertOptions { format: OutputFormat::Object, ..Default::default() }
    }

    #[test]
    fn test_simple_scenario() {
        let input = table(&["A", "A\tB"]);
        let conversion = convert_bytes(input.as_bytes(), &ConvertOptions::default()).unwrap();

        assert_eq!(conversion.hierarchy.to_value().unwrap(), json!({"A": {"B": {}}}));
        assert_eq!(conversion.stats.skipped, 1);
        assert_eq!(conversion.input.row_count, 2);
    }

    #[test]
    fn test_object_scenario() {
        let input = table(&[
            "X\t\t\t\t\t\t\tMainX\tRed\tC1\tU1",
            "X\tY\t\t\t\t\t\tMainY\tBlue\tC2\tU2",
        ]);
        let conversion = convert_bytes(input.as_bytes(), &object_options()).unwrap();

        assert_eq!(
            conversion.hierarchy.to_value().unwrap(),
            json!([{
                "name": "X", "metamaintype": "MainX", "color": "Red", "nci": "C1", "umls": "U1",
                "children": [{
                    "name": "Y", "metamaintype": "MainY", "color": "Blue", "nci": "C2", "umls": "U2",
                    "children": []
                }]
            }])
        );
    }

    #[test]
    fn test_whitespace_levels_continue_the_path() {
        let input = table(&[" A \t  \tC"]);
        let conversion = convert_bytes(input.as_bytes(), &ConvertOptions::default()).unwrap();

        assert_eq!(
            conversion.hierarchy.to_value().unwrap(),
            json!({" A ": {"  ": {"C": {}}}})
        );
    }

    #[test]
    fn test_na_level_ends_the_path() {
        let input = table(&["A\tNA\tC"]);
        let conversion = convert_bytes(input.as_bytes(), &ConvertOptions::default()).unwrap();

        assert_eq!(render_compact(&conversion.hierarchy).unwrap(), "{}");
        assert_eq!(conversion.stats.skipped, 1);
    }

    #[test]
    fn test_object_child_first_is_dropped() {
        let input = table(&["X\tY", "X"]);
        let conversion = convert_bytes(input.as_bytes(), &object_options()).unwrap();

        let value = conversion.hierarchy.to_value().unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["name"], "X");
        assert_eq!(value[0]["children"], json!([]));
        assert_eq!(conversion.stats.dropped.len(), 1);
    }

    #[test]
    fn test_header_only_input() {
        let simple = convert_bytes(HEADER.as_bytes(), &ConvertOptions::default()).unwrap();
        let object = convert_bytes(HEADER.as_bytes(), &object_options()).unwrap();

        assert_eq!(render_compact(&simple.hierarchy).unwrap(), "{}");
        assert_eq!(render_compact(&object.hierarchy).unwrap(), "[]");
    }

    #[test]
    fn test_validation_passes_for_built_output() {
        let input = table(&["A", "A\tB", "A\tB\tC"]);
        for format in [OutputFormat::Simple, OutputFormat::Object] {
            let options = ConvertOptions { format, validate: true, ..Default::default() };
            assert!(convert_bytes(input.as_bytes(), &options).is_ok());
        }
    }

    #[test]
    fn test_missing_column_propagates() {
        let err = convert_bytes(b"level_1\tlevel_2\nA\tB", &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, ConvertError::Csv(CsvError::MissingColumn(_))));
    }

    #[test]
    fn test_missing_file_propagates() {
        let err = convert_file("/nonexistent/oncotree.txt", &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, ConvertError::Csv(CsvError::Io(_))));
    }

    #[test]
    fn test_render_pretty_uses_four_spaces() {
        let (hierarchy, _) = build_hierarchy(&[Row::with_levels(["A", "B"])], OutputFormat::Simple);
        let text = render_pretty(&hierarchy).unwrap();
        assert_eq!(text, "{\n    \"A\": {\n        \"B\": {}\n    }\n}");
    }

    #[test]
    fn test_write_output_file_is_compact() {
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("tumor_types.txt");
        let output_path = dir.path().join("out.json");
        std::fs::write(&input_path, table(&["A", "A\tB", "A\tC"])).unwrap();

        let conversion = convert_file(&input_path, &object_options()).unwrap();
        write_output(&conversion.hierarchy, Some(&output_path)).unwrap();

        let written = std::fs::read_to_string(&output_path).unwrap();
        assert!(!written.contains('\n'));
        let parsed: ObjectHierarchy = serde_json::from_str(&written).unwrap();
        assert_eq!(Hierarchy::Object(parsed), conversion.hierarchy);
    }

    #[test]
    fn test_write_output_unwritable_path() {
        let (hierarchy, _) = build_hierarchy(&[], OutputFormat::Simple);
        let err = write_output(&hierarchy, Some(Path::new("/nonexistent/dir/out.json"))).unwrap_err();
        assert!(matches!(err, ConvertError::Io(_)));
    }

    #[test]
    fn test_validation_error_variant() {
        let bad = json!({"A": "not a mapping"});
        let err: ConvertError = validate_format(OutputFormat::Simple, &bad).unwrap_err().into();
        assert!(matches!(err, ConvertError::Validation(ValidationError::Schema { .. })));
    }

    #[test]
    fn test_node_count() {
        let rows = [Row::with_levels(["A"]), Row::with_levels(["A", "B"]), Row::with_levels(["A", "C"])];
        let (simple, _) = build_hierarchy(&rows, OutputFormat::Simple);
        let (object, stats) = build_hierarchy(&rows, OutputFormat::Object);
        assert_eq!(simple.node_count(), 3);
        assert_eq!(object.node_count(), 3);
        assert_eq!(stats.nodes, 3);
    }
}
