//! Error types for data-science-toolkit.

use std::fmt;

/// All errors produced by toolkit operations.
///
/// Every error is raised before any result is produced; degenerate but
/// well-defined inputs (constant series, empty token sets) are not errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolkitError {
    /// A dynamically-typed source is neither a table, a path nor a mapping.
    UnsupportedInputKind { kind: String },
    /// A file path does not resolve to an existing file.
    ResourceNotFound { path: String },
    /// The input series has no elements.
    EmptyInput,
    /// Fewer observations than the operation needs.
    InsufficientData { min_required: usize, actual: usize },
    /// Moving-average window outside `1..=len`.
    InvalidWindow { window: usize, len: usize },
    /// A value lies outside the domain of the requested method.
    DomainError { method: String, message: String },
    /// A method name that the operation does not know.
    UnsupportedMethod { kind: &'static str, name: String },
    /// A value that should describe a table does not.
    NotTabular { message: String },
    /// The table has no numeric columns.
    NoNumericColumns,
    /// Delimited-text parsing failed.
    CsvParse { line: usize, message: String },
    /// Column length differs from the table's row count.
    DimensionMismatch { expected: usize, actual: usize },
    /// A column name is already present in the table.
    DuplicateColumn { name: String },
    /// Column not found in the table.
    ColumnNotFound { name: String },
    /// A numeric parameter outside its valid range.
    InvalidParameter { name: &'static str, message: String },
    /// I/O error during file reading.
    Io(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ToolkitError>;

impl fmt::Display for ToolkitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedInputKind { kind } => {
                write!(f, "unsupported input kind: {kind}")
            }
            Self::ResourceNotFound { path } => write!(f, "file not found: {path}"),
            Self::EmptyInput => write!(f, "input data must not be empty"),
            Self::InsufficientData {
                min_required,
                actual,
            } => {
                write!(f, "need at least {min_required} data points, got {actual}")
            }
            Self::InvalidWindow { window, len } => {
                write!(f, "invalid window size {window} for series of length {len}")
            }
            Self::DomainError { method, message } => {
                write!(f, "{method}: {message}")
            }
            Self::UnsupportedMethod { kind, name } => {
                write!(f, "unsupported {kind} method: '{name}'")
            }
            Self::NotTabular { message } => write!(f, "input is not tabular: {message}"),
            Self::NoNumericColumns => write!(f, "table must contain numeric columns"),
            Self::CsvParse { line, message } => {
                write!(f, "CSV parse error at line {line}: {message}")
            }
            Self::DimensionMismatch { expected, actual } => {
                write!(f, "expected {expected} elements, got {actual}")
            }
            Self::DuplicateColumn { name } => write!(f, "column '{name}' already exists"),
            Self::ColumnNotFound { name } => write!(f, "column '{name}' not found"),
            Self::InvalidParameter { name, message } => {
                write!(f, "invalid {name}: {message}")
            }
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for ToolkitError {}

impl From<std::io::Error> for ToolkitError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
