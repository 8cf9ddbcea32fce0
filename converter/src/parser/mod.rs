//! Tumor type table parser with encoding auto-detection.
//!
//! Reads a delimited file (tab-separated by default) with a header row into
//! typed [`Row`]s. Header names are matched exactly; columns other than the
//! level and metadata columns are ignored.

use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::models::{Row, LEVEL_COLUMNS, LEVEL_COUNT, META_COLUMNS};

/// Default field separator for OncoTree exports.
pub const DEFAULT_DELIMITER: char = '\t';

/// Cell values read as missing, matched exactly (pandas' default NA set).
pub const NA_VALUES: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a raw cell counts as missing. Whitespace is kept as written.
pub fn is_na(value: &str) -> bool {
    NA_VALUES.contains(&value)
}

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed rows, in file order
    pub rows: Vec<Row>,
    /// Detected encoding
    pub encoding: String,
    /// Delimiter used
    pub delimiter: char,
    /// Column headers
    pub headers: Vec<String>,
}

/// Detect the encoding of raw bytes using chardet
///
/// Input that is already valid UTF-8 is reported as such without guessing.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "utf-8-sig" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8(bytes.to_vec())
            .map_err(|e| CsvError::Encoding(e.to_string())),
        "iso-8859-1" | "latin-1" | "latin1" => {
            Ok(encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned())
        }
        "windows-1252" | "cp1252" => Ok(encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()),
        _ => Ok(String::from_utf8_lossy(bytes).into_owned()),
    }
}

/// Column positions of the fields a [`Row`] needs.
struct ColumnIndex {
    levels: [usize; LEVEL_COUNT],
    meta: [usize; 4],
}

impl ColumnIndex {
    fn from_headers(headers: &[String]) -> CsvResult<Self> {
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| CsvError::MissingColumn(name.to_string()))
        };

        let mut levels = [0; LEVEL_COUNT];
        for (slot, name) in levels.iter_mut().zip(LEVEL_COLUMNS) {
            *slot = position(name)?;
        }
        let mut meta = [0; 4];
        for (slot, name) in meta.iter_mut().zip(META_COLUMNS) {
            *slot = position(name)?;
        }
        Ok(Self { levels, meta })
    }

    fn row(&self, record: &csv::StringRecord) -> Row {
        let cell = |i: usize| {
            record
                .get(i)
                .filter(|v| !is_na(v))
                .map(String::from)
        };

        let mut row = Row::default();
        for (slot, &i) in row.levels.iter_mut().zip(&self.levels) {
            *slot = cell(i);
        }
        row.metamaintype = cell(self.meta[0]);
        row.metacolor = cell(self.meta[1]);
        row.metanci = cell(self.meta[2]);
        row.metaumls = cell(self.meta[3]);
        row
    }
}

/// Parse decoded table content into rows.
///
/// The header row is required and must name every level and metadata column.
/// A header-only table yields no rows. Blank lines are skipped.
pub fn parse_rows(content: &str, delimiter: char) -> CsvResult<(Vec<String>, Vec<Row>)> {
    if content.trim().is_empty() {
        return Err(CsvError::EmptyFile);
    }

    if !delimiter.is_ascii() {
        return Err(CsvError::Parse {
            line: 1,
            message: format!("delimiter '{}' is not an ASCII character", delimiter),
        });
    }
    let delimiter = delimiter as u8;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(CsvError::NoHeaders);
    }

    let index = ColumnIndex::from_headers(&headers)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(index.row(&record));
    }

    Ok((headers, rows))
}

/// Parse bytes with encoding auto-detection and an explicit delimiter.
pub fn parse_bytes(bytes: &[u8], delimiter: char) -> CsvResult<ParseResult> {
    if bytes.is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let (headers, rows) = parse_rows(&content, delimiter)?;

    Ok(ParseResult {
        rows,
        encoding,
        delimiter,
        headers,
    })
}

/// Read and parse a table file.
///
/// # Example
/// ```ignore
/// let result = parse_file("oncotree.txt", '\t')?;
/// println!("Encoding: {}, rows: {}", result.encoding, result.rows.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P, delimiter: char) -> CsvResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes(&bytes, delimiter)
}
