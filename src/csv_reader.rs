//! Delimited-text reader with per-column type inference.
//!
//! Parses delimited text into a [`Table`](crate::table::Table). Field
//! splitting (quotes, escaped quotes, embedded newlines, CRLF) is handled
//! by the `csv` crate; this module adds header handling, missing-value
//! markers and type inference. The inference priority is
//! Numeric → Boolean → Categorical.
//!
//! # Example
//!
//! ```
//! use data_science_toolkit::csv_reader::CsvReader;
//! use data_science_toolkit::table::DataType;
//!
//! let csv = "name,value,active\nAlice,1.5,true\nBob,NA,false\n";
//! let table = CsvReader::new().parse_str(csv).unwrap();
//! assert_eq!(table.shape(), (2, 3));
//! assert_eq!(table.column(0).unwrap().data_type(), DataType::Categorical);
//! assert_eq!(table.column(1).unwrap().data_type(), DataType::Numeric);
//! assert_eq!(table.column(2).unwrap().data_type(), DataType::Boolean);
//! ```

use crate::error::{Result, ToolkitError};
use crate::table::{Column, DataType, Table};
use std::collections::HashSet;

/// Cell contents treated as missing values.
const DEFAULT_NULL_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Text encoding a byte buffer was decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// Valid UTF-8.
    Utf8,
    /// ISO-8859-1; every byte maps to the code point of the same value.
    Latin1,
}

/// Decodes `bytes` as UTF-8, falling back to Latin-1 when that fails.
///
/// Latin-1 decoding cannot fail, so this function always returns text.
pub fn decode_text(bytes: Vec<u8>) -> (String, TextEncoding) {
    match String::from_utf8(bytes) {
        Ok(text) => (text, TextEncoding::Utf8),
        Err(err) => {
            let text = err.into_bytes().into_iter().map(char::from).collect();
            (text, TextEncoding::Latin1)
        }
    }
}

/// Delimited-text reader configuration and entry point.
///
/// ```
/// use data_science_toolkit::csv_reader::CsvReader;
///
/// let table = CsvReader::new().delimiter(b';').parse_str("a;b\n1;2\n3;4\n").unwrap();
/// assert_eq!(table.row_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct CsvReader {
    delimiter: u8,
    has_header: bool,
    null_markers: Vec<String>,
}

impl CsvReader {
    /// Creates a reader with default settings (comma delimiter, header row, standard null markers).
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
            null_markers: DEFAULT_NULL_MARKERS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }

    /// Sets the field delimiter (default: comma).
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether the first row is a header (default: true).
    pub fn has_header(mut self, header: bool) -> Self {
        self.has_header = header;
        self
    }

    /// Sets custom null markers (replaces defaults).
    pub fn null_markers(mut self, markers: Vec<String>) -> Self {
        self.null_markers = markers;
        self
    }

    /// Parses delimited text into a table.
    ///
    /// Rows with a field count different from the first row fail with
    /// `CsvParse`. Empty input yields an empty table.
    pub fn parse_str(&self, input: &str) -> Result<Table> {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .from_reader(input.as_bytes());

        let mut rows: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        if rows.is_empty() {
            return Ok(Table::new());
        }

        let headers = if self.has_header {
            unique_headers(rows.remove(0))
        } else {
            (0..rows[0].len()).map(|i| format!("col_{i}")).collect()
        };

        let n_cols = headers.len();
        let mut raw_columns: Vec<Vec<String>> = vec![Vec::with_capacity(rows.len()); n_cols];
        for row in rows {
            for (col_idx, field) in row.into_iter().enumerate() {
                raw_columns[col_idx].push(field);
            }
        }

        let mut table = Table::new();
        for (name, raw) in headers.into_iter().zip(raw_columns) {
            table.add_column(name, self.build_column(&raw))?;
        }
        Ok(table)
    }

    fn is_null(&self, value: &str) -> bool {
        self.null_markers.iter().any(|m| m == value)
    }

    /// Infers the column type and builds a typed column.
    fn build_column(&self, raw_values: &[String]) -> Column {
        let cells: Vec<Option<&str>> = raw_values
            .iter()
            .map(|s| s.trim())
            .map(|s| if self.is_null(s) { None } else { Some(s) })
            .collect();

        match infer_type(&cells) {
            DataType::Numeric => Column::numeric(
                cells
                    .iter()
                    .map(|c| c.and_then(|s| s.parse::<f64>().ok()).unwrap_or(f64::NAN))
                    .collect(),
            ),
            DataType::Boolean => {
                Column::boolean(cells.iter().map(|c| c.and_then(parse_bool)).collect())
            }
            DataType::Categorical => Column::categorical(cells),
        }
    }
}

impl Default for CsvReader {
    fn default() -> Self {
        Self::new()
    }
}

// ── Helper functions ──────────────────────────────────────────────────

/// Determines the most specific type that fits all non-missing cells.
///
/// A column with no values at all is numeric.
fn infer_type(cells: &[Option<&str>]) -> DataType {
    let mut present = cells.iter().flatten();
    if present.clone().all(|s| s.parse::<f64>().is_ok()) {
        DataType::Numeric
    } else if present.all(|s| parse_bool(s).is_some()) {
        DataType::Boolean
    } else {
        DataType::Categorical
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Renames repeated header names to `name.1`, `name.2`, ...
fn unique_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    raw.into_iter()
        .map(|name| {
            let mut candidate = name.clone();
            let mut suffix = 1;
            while seen.contains(&candidate) {
                candidate = format!("{name}.{suffix}");
                suffix += 1;
            }
            seen.insert(candidate.clone());
            candidate
        })
        .collect()
}

fn csv_error(err: csv::Error) -> ToolkitError {
    let line = err.position().map_or(0, |p| p.line() as usize);
    let message = match err.kind() {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {expected_len} fields, got {len}"),
        _ => err.to_string(),
    };
    ToolkitError::CsvParse { line, message }
}

// ── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_csv() {
        let table = CsvReader::new().parse_str("a,b,c\n1,2,3\n4,5,6\n").unwrap();
        assert_eq!(table.shape(), (2, 3));
        assert_eq!(table.column_names(), &["a", "b", "c"]);
    }

    #[test]
    fn parse_numeric_with_missing() {
        let table = CsvReader::new()
            .parse_str("x\n1.0\nNA\n3.0\n \n5.0\nnull\n")
            .unwrap();
        let x = table.column_by_name("x").unwrap().as_numeric().unwrap();
        assert_eq!(x.len(), 6);
        assert_eq!(x[0], 1.0);
        assert!(x[1].is_nan());
        assert!(x[3].is_nan());
        assert!(x[5].is_nan());
    }

    #[test]
    fn all_null_column_is_numeric() {
        let table = CsvReader::new().parse_str("x,y\nNA,1\nnull,2\n").unwrap();
        let x = table.column_by_name("x").unwrap();
        assert_eq!(x.data_type(), DataType::Numeric);
        assert_eq!(x.null_count(), 2);
    }

    #[test]
    fn parse_boolean_column() {
        let table = CsvReader::new().parse_str("flag\nTrue\nfalse\nNA\nTRUE\n").unwrap();
        let flag = table.column_by_name("flag").unwrap();
        assert_eq!(flag.data_type(), DataType::Boolean);
        assert_eq!(flag.boolean_at(0), Some(true));
        assert_eq!(flag.boolean_at(1), Some(false));
        assert_eq!(flag.boolean_at(2), None);
        assert_eq!(flag.boolean_at(3), Some(true));
    }

    #[test]
    fn yes_no_is_categorical() {
        let table = CsvReader::new().parse_str("flag\nyes\nno\n").unwrap();
        assert_eq!(
            table.column(0).unwrap().data_type(),
            DataType::Categorical
        );
    }

    #[test]
    fn parse_quoted_fields() {
        let csv = "name,desc\nAlice,\"hello, world\"\nBob,\"she said \"\"hi\"\"\"\n";
        let table = CsvReader::new().parse_str(csv).unwrap();
        let desc = table.column_by_name("desc").unwrap();
        assert_eq!(desc.category_at(0), Some("hello, world"));
        assert_eq!(desc.category_at(1), Some("she said \"hi\""));
    }

    #[test]
    fn parse_crlf_and_bom() {
        let table = CsvReader::new().parse_str("\u{feff}a,b\r\n1,2\r\n3,4\r\n").unwrap();
        assert_eq!(table.column_names(), &["a", "b"]);
        assert_eq!(
            table.column_by_name("a").unwrap().as_numeric(),
            Some(&[1.0, 3.0][..])
        );
    }

    #[test]
    fn ragged_rows_fail() {
        let err = CsvReader::new().parse_str("a,b\n1,2\n3\n").unwrap_err();
        match err {
            ToolkitError::CsvParse { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("expected 2 fields"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn no_header_names_columns() {
        let table = CsvReader::new().has_header(false).parse_str("1,2\n3,4\n").unwrap();
        assert_eq!(table.column_names(), &["col_0", "col_1"]);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn duplicate_headers_are_renamed() {
        let table = CsvReader::new().parse_str("a,a,a\n1,2,3\n").unwrap();
        assert_eq!(table.column_names(), &["a", "a.1", "a.2"]);
    }

    #[test]
    fn header_only_gives_zero_rows() {
        let table = CsvReader::new().parse_str("a,b\n").unwrap();
        assert_eq!(table.shape(), (0, 2));
    }

    #[test]
    fn empty_input() {
        let table = CsvReader::new().parse_str("").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn custom_null_markers() {
        let table = CsvReader::new()
            .null_markers(vec!["-".into()])
            .parse_str("x\n1\n-\n")
            .unwrap();
        let x = table.column(0).unwrap().as_numeric().unwrap();
        assert!(x[1].is_nan());
    }

    #[test]
    fn decode_falls_back_to_latin1() {
        let (text, enc) = decode_text("zaż".as_bytes().to_vec());
        assert_eq!(enc, TextEncoding::Utf8);
        assert_eq!(text, "zaż");

        let (text, enc) = decode_text(vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(enc, TextEncoding::Latin1);
        assert_eq!(text, "café");
    }
}
