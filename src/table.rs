//! Column-major table for tabular data.
//!
//! A [`Table`] stores named, typed columns of equal length. It is the
//! canonical form every ingestion path produces and the input of
//! [`correlation_matrix`](crate::correlation::correlation_matrix) and
//! [`DataProcessor::remove_duplicates`](crate::ingest::DataProcessor::remove_duplicates).
//!
//! # Column Types
//!
//! | Type | Storage | Missing value |
//! |------|---------|---------------|
//! | [`Numeric`](Column::Numeric) | `Vec<f64>` | `NaN` |
//! | [`Boolean`](Column::Boolean) | `Vec<Option<bool>>` | `None` |
//! | [`Categorical`](Column::Categorical) | Dictionary + `Vec<Option<u32>>` | `None` |
//!
//! # Example
//!
//! ```
//! use data_science_toolkit::table::{Column, Table};
//!
//! let mut table = Table::new();
//! table.add_column("temperature", Column::numeric(vec![20.5, 21.3, 19.8])).unwrap();
//! table.add_column("city", Column::categorical(vec![Some("Oslo"), Some("Rome"), None])).unwrap();
//! assert_eq!(table.shape(), (3, 2));
//! ```

use crate::error::{Result, ToolkitError};
use serde_json::Value;
use std::collections::HashMap;

// ── DataType ──────────────────────────────────────────────────────────

/// Semantic data type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// Real values stored as `f64`.
    Numeric,
    /// True/false values.
    Boolean,
    /// Strings, dictionary-encoded.
    Categorical,
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric => write!(f, "Numeric"),
            Self::Boolean => write!(f, "Boolean"),
            Self::Categorical => write!(f, "Categorical"),
        }
    }
}

// ── Column ────────────────────────────────────────────────────────────

/// A typed column.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Dense `f64` values. Missing cells are `NaN`.
    Numeric(Vec<f64>),
    /// Boolean values.
    Boolean(Vec<Option<bool>>),
    /// Dictionary-encoded strings.
    ///
    /// `dictionary` holds each distinct string once, in first-seen order;
    /// `codes` maps every row to a dictionary index.
    Categorical {
        dictionary: Vec<String>,
        codes: Vec<Option<u32>>,
    },
}

impl Column {
    /// Creates a numeric column.
    pub fn numeric(values: Vec<f64>) -> Self {
        Self::Numeric(values)
    }

    /// Creates a boolean column.
    pub fn boolean(values: Vec<Option<bool>>) -> Self {
        Self::Boolean(values)
    }

    /// Creates a categorical column, building the dictionary in first-seen order.
    pub fn categorical<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let mut lookup: HashMap<String, u32> = HashMap::new();
        let mut dictionary = Vec::new();
        let codes = values
            .into_iter()
            .map(|value| {
                value.map(|s| {
                    let s = s.into();
                    *lookup.entry(s).or_insert_with_key(|key| {
                        dictionary.push(key.clone());
                        (dictionary.len() - 1) as u32
                    })
                })
            })
            .collect();
        Self::Categorical { dictionary, codes }
    }

    /// Returns the data type of this column.
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Numeric(_) => DataType::Numeric,
            Self::Boolean(_) => DataType::Boolean,
            Self::Categorical { .. } => DataType::Categorical,
        }
    }

    /// Returns the number of rows in this column.
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(values) => values.len(),
            Self::Boolean(values) => values.len(),
            Self::Categorical { codes, .. } => codes.len(),
        }
    }

    /// Returns `true` if the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of missing cells.
    pub fn null_count(&self) -> usize {
        match self {
            Self::Numeric(values) => values.iter().filter(|v| v.is_nan()).count(),
            Self::Boolean(values) => values.iter().filter(|v| v.is_none()).count(),
            Self::Categorical { codes, .. } => codes.iter().filter(|c| c.is_none()).count(),
        }
    }

    /// Returns the numeric values, or `None` if not a numeric column.
    pub fn as_numeric(&self) -> Option<&[f64]> {
        match self {
            Self::Numeric(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the boolean at `idx`, or `None` if missing or not boolean.
    pub fn boolean_at(&self, idx: usize) -> Option<bool> {
        match self {
            Self::Boolean(values) => values.get(idx).copied().flatten(),
            _ => None,
        }
    }

    /// Returns the category string at `idx`, or `None` if missing or not categorical.
    pub fn category_at(&self, idx: usize) -> Option<&str> {
        match self {
            Self::Categorical { dictionary, codes } => codes
                .get(idx)
                .copied()
                .flatten()
                .and_then(|code| dictionary.get(code as usize))
                .map(String::as_str),
            _ => None,
        }
    }

    /// Hashable identity of the cell at `idx`, used for row comparison.
    fn cell_key(&self, idx: usize) -> CellKey {
        match self {
            Self::Numeric(values) => {
                let v = values[idx];
                if v.is_nan() {
                    CellKey::Missing
                } else if v == 0.0 {
                    // -0.0 and 0.0 are the same value
                    CellKey::Number(0f64.to_bits())
                } else {
                    CellKey::Number(v.to_bits())
                }
            }
            Self::Boolean(values) => values[idx].map_or(CellKey::Missing, CellKey::Bool),
            Self::Categorical { codes, .. } => codes[idx].map_or(CellKey::Missing, CellKey::Code),
        }
    }

    /// Returns a new column holding the given rows, in the given order.
    fn take(&self, rows: &[usize]) -> Self {
        match self {
            Self::Numeric(values) => Self::Numeric(rows.iter().map(|&i| values[i]).collect()),
            Self::Boolean(values) => Self::Boolean(rows.iter().map(|&i| values[i]).collect()),
            Self::Categorical { dictionary, codes } => Self::Categorical {
                dictionary: dictionary.clone(),
                codes: rows.iter().map(|&i| codes[i]).collect(),
            },
        }
    }
}

/// Identity of a single cell. Missing cells compare equal to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum CellKey {
    Missing,
    Number(u64),
    Bool(bool),
    Code(u32),
}

// ── Table ─────────────────────────────────────────────────────────────

/// Column-major tabular data structure.
///
/// Column names are unique and every column has the same number of rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Creates an empty table with no columns or rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(name, column)` pairs.
    ///
    /// ```
    /// use data_science_toolkit::table::{Column, Table};
    ///
    /// let table = Table::from_columns(vec![
    ///     ("a", Column::numeric(vec![1.0, 2.0])),
    ///     ("b", Column::numeric(vec![3.0, 4.0])),
    /// ]).unwrap();
    /// assert_eq!(table.column_names(), &["a", "b"]);
    /// ```
    pub fn from_columns<I, N>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, Column)>,
        N: Into<String>,
    {
        let mut table = Self::new();
        for (name, column) in columns {
            table.add_column(name, column)?;
        }
        Ok(table)
    }

    /// Adds a named column.
    ///
    /// Fails with `DimensionMismatch` when the length differs from the
    /// existing row count and with `DuplicateColumn` on a repeated name.
    pub fn add_column(&mut self, name: impl Into<String>, column: Column) -> Result<()> {
        let name = name.into();
        if self.names.contains(&name) {
            return Err(ToolkitError::DuplicateColumn { name });
        }
        let len = column.len();
        if self.columns.is_empty() {
            self.row_count = len;
        } else if len != self.row_count {
            return Err(ToolkitError::DimensionMismatch {
                expected: self.row_count,
                actual: len,
            });
        }
        self.names.push(name);
        self.columns.push(column);
        Ok(())
    }

    /// Returns the number of rows.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Returns the number of columns.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count, self.columns.len())
    }

    /// Returns `true` if the table has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns column names in insertion order.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Returns the column at `index`.
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Returns the column with the given `name`.
    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.column_index(name).map(|i| &self.columns[i])
    }

    /// Returns the index of the column with the given `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Returns an iterator over `(name, column)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.names.iter().map(String::as_str).zip(self.columns.iter())
    }

    /// Returns the data type of every column.
    pub fn schema(&self) -> Vec<(&str, DataType)> {
        self.iter().map(|(name, col)| (name, col.data_type())).collect()
    }

    /// Returns the numeric columns only, in table order.
    pub fn numeric_columns(&self) -> Vec<(&str, &[f64])> {
        self.iter()
            .filter_map(|(name, col)| col.as_numeric().map(|values| (name, values)))
            .collect()
    }

    /// Returns a new table containing `rows` (by index), in the given order.
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        Self {
            names: self.names.clone(),
            columns: self.columns.iter().map(|c| c.take(rows)).collect(),
            row_count: if self.columns.is_empty() { 0 } else { rows.len() },
        }
    }

    /// Identity of row `row` restricted to the columns at `columns`.
    pub(crate) fn row_key(&self, row: usize, columns: &[usize]) -> Vec<CellKey> {
        columns
            .iter()
            .map(|&c| self.columns[c].cell_key(row))
            .collect()
    }

    /// Builds a table from a JSON object mapping column names to arrays.
    ///
    /// Arrays of numbers (and nulls) become numeric columns, arrays of
    /// booleans become boolean columns, anything else is categorical.
    ///
    /// ```
    /// use data_science_toolkit::table::{DataType, Table};
    ///
    /// let value = serde_json::json!({"x": [1, 2, null], "tag": ["a", "b", "a"]});
    /// let table = Table::from_json(&value).unwrap();
    /// assert_eq!(table.schema(), vec![("x", DataType::Numeric), ("tag", DataType::Categorical)]);
    /// assert!(table.column(0).unwrap().as_numeric().unwrap()[2].is_nan());
    /// ```
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| ToolkitError::NotTabular {
            message: format!("expected an object of column arrays, got {}", json_kind(value)),
        })?;
        let mut table = Self::new();
        for (name, cells) in object {
            let cells = cells.as_array().ok_or_else(|| ToolkitError::NotTabular {
                message: format!("column '{name}' is {}, not an array", json_kind(cells)),
            })?;
            table.add_column(name.clone(), column_from_json(cells))?;
        }
        Ok(table)
    }
}

fn column_from_json(cells: &[Value]) -> Column {
    let non_null = || cells.iter().filter(|v| !v.is_null());
    if non_null().all(Value::is_number) {
        return Column::numeric(
            cells
                .iter()
                .map(|v| v.as_f64().unwrap_or(f64::NAN))
                .collect(),
        );
    }
    if non_null().all(Value::is_boolean) {
        return Column::boolean(cells.iter().map(Value::as_bool).collect());
    }
    Column::categorical(cells.iter().map(|v| match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }))
}

/// Short name of a JSON value's kind, for error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────
