//! Ingestion: turning heterogeneous sources into a validated [`Table`].
//!
//! A [`DataSource`] is resolved once, at the boundary. Dynamically-typed
//! input (for example a JSON payload) is classified by
//! [`DataSource::from_json`]; from there on every path is typed.
//!
//! ```
//! use data_science_toolkit::ingest::{DataProcessor, DataSource};
//! use data_science_toolkit::table::Column;
//!
//! let mut processor = DataProcessor::new();
//! let table = processor
//!     .load_and_validate(DataSource::Mapping(vec![
//!         ("id".into(), Column::numeric(vec![1.0, 2.0, 2.0])),
//!         ("name".into(), Column::categorical(vec![Some("a"), Some("b"), Some("b")])),
//!     ]))
//!     .unwrap();
//! assert_eq!(processor.original_shape(), Some((3, 2)));
//!
//! let unique = processor.remove_duplicates(&table, None).unwrap();
//! assert_eq!(unique.row_count(), 2);
//! ```

use crate::csv_reader::{decode_text, CsvReader, TextEncoding};
use crate::error::{Result, ToolkitError};
use crate::table::{json_kind, CellKey, Column, Table};
use log::{error, info, warn};
use serde_json::Value;
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// The kinds of input accepted by [`DataProcessor::load_and_validate`].
#[derive(Debug, Clone)]
pub enum DataSource {
    /// An existing table; it is copied, the caller keeps the original.
    Table(Table),
    /// Path to a delimited-text file.
    Path(PathBuf),
    /// Column name → values, all of the same length.
    Mapping(Vec<(String, Column)>),
}

impl DataSource {
    /// Classifies a dynamically-typed value.
    ///
    /// A string is a file path, an object of arrays is a column mapping;
    /// anything else fails with `UnsupportedInputKind`.
    ///
    /// ```
    /// use data_science_toolkit::ingest::DataSource;
    ///
    /// let source = DataSource::from_json(serde_json::json!({"x": [1, 2]})).unwrap();
    /// assert!(matches!(source, DataSource::Mapping(_)));
    /// assert!(DataSource::from_json(serde_json::json!(42)).is_err());
    /// ```
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::String(path) => Ok(Self::Path(PathBuf::from(path))),
            Value::Object(_) => {
                let table = Table::from_json(&value)?;
                let columns = table
                    .iter()
                    .map(|(name, col)| (name.to_string(), col.clone()))
                    .collect();
                Ok(Self::Mapping(columns))
            }
            other => Err(ToolkitError::UnsupportedInputKind {
                kind: json_kind(&other).to_string(),
            }),
        }
    }
}

impl From<Table> for DataSource {
    fn from(table: Table) -> Self {
        Self::Table(table)
    }
}

impl From<PathBuf> for DataSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for DataSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

/// Options for [`load_csv_safe`].
#[derive(Debug, Clone, Default)]
pub struct CsvOptions {
    /// Reader configuration (delimiter, header, null markers).
    pub reader: CsvReader,
}

/// Loads and validates tabular input, remembering the shape it saw.
#[derive(Debug, Clone, Default)]
pub struct DataProcessor {
    original_shape: Option<(usize, usize)>,
    csv: CsvOptions,
}

impl DataProcessor {
    /// Creates a processor with default delimited-text settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `options` when a [`DataSource::Path`] is loaded.
    pub fn with_csv_options(mut self, options: CsvOptions) -> Self {
        self.csv = options;
        self
    }

    /// Shape `(rows, columns)` of the last successfully loaded table.
    pub fn original_shape(&self) -> Option<(usize, usize)> {
        self.original_shape
    }

    /// Resolves `source` into a table.
    ///
    /// Fails with `ResourceNotFound` for a missing path and with
    /// `DimensionMismatch` for a mapping whose columns differ in length.
    pub fn load_and_validate(&mut self, source: impl Into<DataSource>) -> Result<Table> {
        let table = match source.into() {
            DataSource::Table(table) => table,
            DataSource::Path(path) => load_csv_safe(&path, &self.csv)?,
            DataSource::Mapping(columns) => Table::from_columns(columns)?,
        };

        let shape = table.shape();
        self.original_shape = Some(shape);
        info!("data loaded, shape: {shape:?}");
        Ok(table)
    }

    /// Returns a copy of `table` without duplicate rows.
    ///
    /// Rows are compared on `subset` when given, otherwise on every column.
    /// The first row of each duplicate group is kept and row order is
    /// preserved. Missing values compare equal to each other.
    pub fn remove_duplicates(&self, table: &Table, subset: Option<&[&str]>) -> Result<Table> {
        let columns: Vec<usize> = match subset {
            Some(names) => names
                .iter()
                .map(|&name| {
                    table
                        .column_index(name)
                        .ok_or_else(|| ToolkitError::ColumnNotFound {
                            name: name.to_string(),
                        })
                })
                .collect::<Result<_>>()?,
            None => (0..table.column_count()).collect(),
        };

        let mut seen: HashSet<Vec<CellKey>> = HashSet::new();
        let keep: Vec<usize> = (0..table.row_count())
            .filter(|&row| seen.insert(table.row_key(row, &columns)))
            .collect();

        let removed = table.row_count() - keep.len();
        if removed > 0 {
            info!("removed {removed} duplicate rows");
        }
        Ok(table.select_rows(&keep))
    }
}

/// Reads a delimited-text file into a table.
///
/// The file is decoded as UTF-8, falling back to Latin-1 when the bytes
/// are not valid UTF-8. A missing file fails with `ResourceNotFound`;
/// any other read failure is returned as `Io`.
pub fn load_csv_safe(path: &Path, options: &CsvOptions) -> Result<Table> {
    let display = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|e| {
        error!("failed to load {display}: {e}");
        match e.kind() {
            ErrorKind::NotFound => ToolkitError::ResourceNotFound {
                path: display.clone(),
            },
            _ => ToolkitError::from(e),
        }
    })?;

    let (text, encoding) = decode_text(bytes);
    if encoding == TextEncoding::Latin1 {
        warn!("UTF-8 decoding failed for {display}, read as Latin-1");
    }

    let table = options.reader.parse_str(&text).inspect_err(|e| {
        error!("failed to load {display}: {e}");
    })?;
    info!("loaded {display} with shape {:?}", table.shape());
    Ok(table)
}

// ── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn write_temp(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(bytes).expect("write temp file");
        file
    }

    #[test]
    fn load_from_table_copies() {
        let original = Table::from_columns(vec![("x", Column::numeric(vec![1.0, 2.0]))]).unwrap();
        let mut processor = DataProcessor::new();
        let loaded = processor.load_and_validate(original.clone()).unwrap();
        assert_eq!(loaded, original);
        assert_eq!(processor.original_shape(), Some((2, 1)));
    }

    #[test]
    fn load_from_mapping_length_mismatch() {
        let mut processor = DataProcessor::new();
        let err = processor
            .load_and_validate(DataSource::Mapping(vec![
                ("a".into(), Column::numeric(vec![1.0, 2.0])),
                ("b".into(), Column::numeric(vec![1.0])),
            ]))
            .unwrap_err();
        assert!(matches!(err, ToolkitError::DimensionMismatch { .. }));
        assert_eq!(processor.original_shape(), None);
    }

    #[test]
    fn load_from_path() {
        let file = write_temp(b"x,y\n1,a\n2,b\n3,c\n");
        let mut processor = DataProcessor::new();
        let table = processor.load_and_validate(file.path()).unwrap();
        assert_eq!(table.shape(), (3, 2));
        assert_eq!(processor.original_shape(), Some((3, 2)));
    }

    #[test]
    fn load_with_custom_delimiter() {
        let file = write_temp(b"x;y\n1;2\n");
        let options = CsvOptions {
            reader: CsvReader::new().delimiter(b';'),
        };
        let mut processor = DataProcessor::new().with_csv_options(options);
        let table = processor.load_and_validate(file.path()).unwrap();
        assert_eq!(table.column_names(), &["x", "y"]);
    }

    #[test]
    fn missing_path_is_resource_not_found() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent.csv");
        let mut processor = DataProcessor::new();
        let err = processor.load_and_validate(path.as_path()).unwrap_err();
        assert!(matches!(err, ToolkitError::ResourceNotFound { ref path } if path.ends_with("absent.csv")));
    }

    #[test]
    fn latin1_fallback() {
        // 0xE9 is é in Latin-1 and invalid as a lone UTF-8 byte
        let file = write_temp(b"city,n\nCaf\xe9,1\n");
        let table = load_csv_safe(file.path(), &CsvOptions::default()).unwrap();
        assert_eq!(table.column_by_name("city").unwrap().category_at(0), Some("Café"));
    }

    #[test]
    fn source_from_json() {
        assert!(matches!(
            DataSource::from_json(json!("data.csv")).unwrap(),
            DataSource::Path(ref p) if p == Path::new("data.csv")
        ));
        let err = DataSource::from_json(json!([1, 2])).unwrap_err();
        assert_eq!(
            err,
            ToolkitError::UnsupportedInputKind {
                kind: "an array".into()
            }
        );
        let err = DataSource::from_json(json!({"a": "scalar"})).unwrap_err();
        assert!(matches!(err, ToolkitError::NotTabular { .. }));
    }

    #[test]
    fn remove_duplicates_all_columns() {
        let table = Table::from_columns(vec![
            ("a", Column::numeric(vec![1.0, 1.0, 2.0, 1.0])),
            ("b", Column::categorical(vec![Some("x"), Some("x"), Some("y"), Some("z")])),
        ])
        .unwrap();
        let out = DataProcessor::new().remove_duplicates(&table, None).unwrap();
        assert_eq!(out.row_count(), 3);
        assert_eq!(out.column_by_name("a").unwrap().as_numeric(), Some(&[1.0, 2.0, 1.0][..]));
        assert_eq!(out.column_by_name("b").unwrap().category_at(2), Some("z"));
    }

    #[test]
    fn remove_duplicates_subset_keeps_first() {
        let table = Table::from_columns(vec![
            ("id", Column::numeric(vec![3.0, 1.0, 3.0, 1.0])),
            ("v", Column::numeric(vec![10.0, 20.0, 30.0, 40.0])),
        ])
        .unwrap();
        let out = DataProcessor::new()
            .remove_duplicates(&table, Some(&["id"]))
            .unwrap();
        assert_eq!(out.column_by_name("v").unwrap().as_numeric(), Some(&[10.0, 20.0][..]));
    }

    #[test]
    fn remove_duplicates_missing_values_match() {
        let table = Table::from_columns(vec![(
            "x",
            Column::numeric(vec![f64::NAN, 1.0, f64::NAN]),
        )])
        .unwrap();
        let out = DataProcessor::new().remove_duplicates(&table, None).unwrap();
        assert_eq!(out.row_count(), 2);
    }

    #[test]
    fn remove_duplicates_unknown_subset_column() {
        let table = Table::from_columns(vec![("x", Column::numeric(vec![1.0]))]).unwrap();
        let err = DataProcessor::new()
            .remove_duplicates(&table, Some(&["nope"]))
            .unwrap_err();
        assert_eq!(err, ToolkitError::ColumnNotFound { name: "nope".into() });
    }

    #[test]
    fn remove_duplicates_without_duplicates_is_identity() {
        let table = Table::from_columns(vec![("x", Column::numeric(vec![1.0, 2.0, 3.0]))]).unwrap();
        let out = DataProcessor::new().remove_duplicates(&table, None).unwrap();
        assert_eq!(out, table);
    }
}
