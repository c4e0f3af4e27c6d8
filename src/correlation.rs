//! Correlation matrices over the numeric columns of a table.
//!
//! Non-numeric columns are ignored. Each pair of columns is correlated
//! over the rows where both values are present (pairwise-complete
//! observations). The matrix is symmetric with a unit diagonal. A pair
//! with too few complete rows, or with a constant column, has an
//! undefined coefficient and is reported as `NaN`.
//!
//! # Methods
//!
//! - **Pearson**: product-moment correlation.
//! - **Spearman**: Pearson correlation of average ranks (ties share the
//!   mean of their rank positions).
//! - **Kendall**: τ-b, which corrects for ties in either variable.
//!   Reference: Kendall (1945), "The treatment of ties in ranking
//!   problems", *Biometrika* 33(3).
//!
//! ```
//! use data_science_toolkit::correlation::{correlation_matrix, CorrelationMethod};
//! use data_science_toolkit::table::{Column, Table};
//!
//! let table = Table::from_columns(vec![
//!     ("x", Column::numeric(vec![1.0, 2.0, 3.0, 4.0, 5.0])),
//!     ("y", Column::numeric(vec![5.0, 3.0, 4.0, 2.0, 1.0])),
//!     ("tag", Column::categorical(vec![Some("a"); 5])),
//! ]).unwrap();
//!
//! let m = correlation_matrix(&table, CorrelationMethod::Pearson).unwrap();
//! assert_eq!(m.names(), &["x", "y"]);
//! assert!((m.get(0, 1) + 0.9).abs() < 1e-12);
//! ```

use crate::error::{Result, ToolkitError};
use crate::table::Table;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Method for correlation computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationMethod {
    /// Pearson product-moment correlation.
    #[default]
    Pearson,
    /// Spearman rank correlation.
    Spearman,
    /// Kendall rank correlation (τ-b).
    Kendall,
}

impl FromStr for CorrelationMethod {
    type Err = ToolkitError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pearson" => Ok(Self::Pearson),
            "spearman" => Ok(Self::Spearman),
            "kendall" => Ok(Self::Kendall),
            other => Err(ToolkitError::UnsupportedMethod {
                kind: "correlation",
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for CorrelationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pearson => write!(f, "pearson"),
            Self::Spearman => write!(f, "spearman"),
            Self::Kendall => write!(f, "kendall"),
        }
    }
}

/// Square correlation matrix keyed by column name on both axes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    method: CorrelationMethod,
    names: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Method the matrix was computed with.
    pub fn method(&self) -> CorrelationMethod {
        self.method
    }

    /// Column names, in table order; row `i` and column `i` belong to `names()[i]`.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of rows (= number of columns).
    pub fn size(&self) -> usize {
        self.names.len()
    }

    /// Coefficient at `(row, col)`.
    ///
    /// # Panics
    /// If either index is out of range.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }

    /// Coefficient between two named columns.
    pub fn by_name(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.names.iter().position(|n| n == a)?;
        let j = self.names.iter().position(|n| n == b)?;
        Some(self.values[i][j])
    }

    /// Matrix rows.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.values
    }
}

/// Computes the correlation matrix of the numeric columns of `table`.
///
/// Fails with `NoNumericColumns` when the table has none.
pub fn correlation_matrix(table: &Table, method: CorrelationMethod) -> Result<CorrelationMatrix> {
    let columns = table.numeric_columns();
    if columns.is_empty() {
        return Err(ToolkitError::NoNumericColumns);
    }

    let k = columns.len();
    let mut values = vec![vec![1.0; k]; k];
    for i in 0..k {
        for j in (i + 1)..k {
            let r = pair_correlation(columns[i].1, columns[j].1, method);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix {
        method,
        names: columns.iter().map(|(name, _)| (*name).to_string()).collect(),
        values,
    })
}

/// Rows where neither value is missing.
fn complete_pairs(x: &[f64], y: &[f64]) -> (Vec<f64>, Vec<f64>) {
    x.iter()
        .zip(y)
        .filter(|(a, b)| !a.is_nan() && !b.is_nan())
        .map(|(&a, &b)| (a, b))
        .unzip()
}

/// Correlation of two series over their pairwise-complete rows.
///
/// Returns `NaN` when the coefficient is undefined: too few complete rows,
/// or no variation in either series.
///
/// ```
/// use data_science_toolkit::correlation::{pair_correlation, CorrelationMethod};
///
/// let x = [1.0, 2.0, f64::NAN, 4.0, 5.0];
/// let y = [2.0, 1.0, 100.0, 4.0, 3.0];
/// let r = pair_correlation(&x, &y, CorrelationMethod::Pearson);
/// assert!((r - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-10);
/// assert!(pair_correlation(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0], CorrelationMethod::Pearson).is_nan());
/// ```
pub fn pair_correlation(x: &[f64], y: &[f64], method: CorrelationMethod) -> f64 {
    let (x, y) = complete_pairs(x, y);
    let result = match method {
        CorrelationMethod::Pearson => u_analytics::correlation::pearson(&x, &y),
        CorrelationMethod::Spearman => u_analytics::correlation::spearman(&x, &y),
        CorrelationMethod::Kendall => u_analytics::correlation::kendall_tau_b(&x, &y),
    };
    result.map_or(f64::NAN, |c| c.r.clamp(-1.0, 1.0))
}

// ── Tests ─────────────────────────────────────────────────────────────
