//! Descriptive statistics, confidence intervals and generalized means.
//!
//! Location, spread and order statistics come from `u_numflow::stats`:
//!
//! - **Variance/StdDev**: sample estimators (Bessel's correction, `n − 1`).
//! - **Quartiles**: R-7 linear interpolation.
//!
//! Shape statistics use the population central moments `m_k`:
//!
//! - **Skewness**: Fisher–Pearson coefficient `g₁ = m₃ / m₂^{3/2}`.
//! - **Kurtosis**: excess kurtosis `g₂ = m₄ / m₂² − 3`.
//!
//! Statistics that are undefined for a given sample (for example the
//! standard deviation of a single value) are reported as `NaN`.
//!
//! ```
//! use data_science_toolkit::stats::StatisticalCalculator;
//!
//! let mut calc = StatisticalCalculator::new();
//! let summary = calc.descriptive_stats(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]).unwrap();
//! assert_eq!(summary.count, 10);
//! assert_eq!(summary.mean, 5.5);
//! assert_eq!(summary.median, 5.5);
//! assert_eq!(calc.history().len(), 1);
//! ```

use crate::error::{Result, ToolkitError};
use crate::normalize::{normalize, NormalizationMethod};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Default confidence level for [`StatisticalCalculator::confidence_interval`].
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

// ── Descriptive summary ───────────────────────────────────────────────

/// Descriptive statistics of one series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DescriptiveSummary {
    /// Number of observations.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Median (50th percentile).
    pub median: f64,
    /// Sample standard deviation.
    pub std: f64,
    /// Sample variance.
    #[serde(rename = "var")]
    pub variance: f64,
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
    /// 25th percentile.
    pub q25: f64,
    /// 75th percentile.
    pub q75: f64,
    /// Population skewness g1; `NaN` for a constant series.
    pub skewness: f64,
    /// Population excess kurtosis g2; `NaN` for a constant series.
    pub kurtosis: f64,
}

impl DescriptiveSummary {
    /// Computes the summary of `data`. Fails with `EmptyInput` on an empty slice.
    pub fn from_data(data: &[f64]) -> Result<Self> {
        if data.is_empty() {
            return Err(ToolkitError::EmptyInput);
        }
        use u_numflow::stats;
        let mean = stats::mean(data).unwrap_or(f64::NAN);
        let (skewness, kurtosis) = shape_moments(data, mean);
        Ok(Self {
            count: data.len(),
            mean,
            median: stats::median(data).unwrap_or(f64::NAN),
            std: stats::std_dev(data).unwrap_or(f64::NAN),
            variance: stats::variance(data).unwrap_or(f64::NAN),
            min: stats::min(data).unwrap_or(f64::NAN),
            max: stats::max(data).unwrap_or(f64::NAN),
            q25: stats::quantile(data, 0.25).unwrap_or(f64::NAN),
            q75: stats::quantile(data, 0.75).unwrap_or(f64::NAN),
            skewness,
            kurtosis,
        })
    }
}

/// Population skewness `g₁` and excess kurtosis `g₂`; both `NaN` when the
/// series has no variation.
fn shape_moments(data: &[f64], mean: f64) -> (f64, f64) {
    let n = data.len() as f64;
    let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
    for &x in data {
        let d = x - mean;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }
    let (m2, m3, m4) = (m2 / n, m3 / n, m4 / n);
    if m2 == 0.0 {
        return (f64::NAN, f64::NAN);
    }
    (m3 / m2.powf(1.5), m4 / (m2 * m2) - 3.0)
}

// ── Calculator ────────────────────────────────────────────────────────

/// Statistics engine with an append-only log of computed summaries.
///
/// The log belongs to this instance; it grows with every summary computed
/// and is only dropped together with the calculator.
#[derive(Debug, Clone, Default)]
pub struct StatisticalCalculator {
    history: Vec<(String, DescriptiveSummary)>,
}

impl StatisticalCalculator {
    /// Creates a calculator with an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the [`DescriptiveSummary`] of `data` and records it.
    pub fn descriptive_stats(&mut self, data: &[f64]) -> Result<DescriptiveSummary> {
        let summary = DescriptiveSummary::from_data(data)?;
        self.record("descriptive_stats", summary);
        Ok(summary)
    }

    /// Rescales `data` with `method`, then summarizes the rescaled series.
    ///
    /// ```
    /// use data_science_toolkit::normalize::NormalizationMethod;
    /// use data_science_toolkit::stats::StatisticalCalculator;
    ///
    /// let mut calc = StatisticalCalculator::new();
    /// let s = calc.describe_normalized(&[10.0, 20.0, 30.0], NormalizationMethod::MinMax).unwrap();
    /// assert_eq!((s.min, s.max), (0.0, 1.0));
    /// ```
    pub fn describe_normalized(
        &mut self,
        data: &[f64],
        method: NormalizationMethod,
    ) -> Result<DescriptiveSummary> {
        if data.is_empty() {
            return Err(ToolkitError::EmptyInput);
        }
        let summary = DescriptiveSummary::from_data(&normalize(data, method))?;
        self.record("describe_normalized", summary);
        Ok(summary)
    }

    /// Two-sided Student-t confidence interval for the mean of `data`.
    ///
    /// Returns `(lower, upper)` = `mean ∓ t(1 − α/2, n − 1) · s/√n` with
    /// `α = 1 − confidence`. Requires at least two observations and
    /// `0 < confidence < 1`.
    ///
    /// ```
    /// use data_science_toolkit::stats::{StatisticalCalculator, DEFAULT_CONFIDENCE};
    ///
    /// let calc = StatisticalCalculator::new();
    /// let (lo, hi) = calc.confidence_interval(&[1.0, 2.0, 3.0, 4.0, 5.0], DEFAULT_CONFIDENCE).unwrap();
    /// assert!(lo < 3.0 && 3.0 < hi);
    /// ```
    pub fn confidence_interval(&self, data: &[f64], confidence: f64) -> Result<(f64, f64)> {
        let n = data.len();
        if n < 2 {
            return Err(ToolkitError::InsufficientData {
                min_required: 2,
                actual: n,
            });
        }
        if !(confidence > 0.0 && confidence < 1.0) {
            return Err(ToolkitError::InvalidParameter {
                name: "confidence",
                message: format!("must lie strictly between 0 and 1, got {confidence}"),
            });
        }

        let mean = u_numflow::stats::mean(data).unwrap_or(f64::NAN);
        let std_err = u_numflow::stats::std_dev(data).unwrap_or(f64::NAN) / (n as f64).sqrt();
        let t = u_numflow::special::t_distribution_quantile((1.0 + confidence) / 2.0, (n - 1) as f64);
        let half_width = t * std_err;
        Ok((mean - half_width, mean + half_width))
    }

    /// All recorded `(operation, summary)` pairs, oldest first.
    pub fn history(&self) -> &[(String, DescriptiveSummary)] {
        &self.history
    }

    /// The most recently recorded summary.
    pub fn last_calculation(&self) -> Option<&DescriptiveSummary> {
        self.history.last().map(|(_, summary)| summary)
    }

    fn record(&mut self, operation: &str, summary: DescriptiveSummary) {
        self.history.push((operation.to_string(), summary));
    }
}

// ── Generalized means ─────────────────────────────────────────────────

/// Kind of mean computed by [`advanced_mean`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeanMethod {
    /// `Σx / n`.
    #[default]
    Arithmetic,
    /// `exp(mean(ln x))`; requires every value > 0.
    Geometric,
    /// `n / Σ(1/x)`; requires every value > 0.
    Harmonic,
    /// Root mean square, `sqrt(mean(x²))`.
    Quadratic,
}

impl FromStr for MeanMethod {
    type Err = ToolkitError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "arithmetic" => Ok(Self::Arithmetic),
            "geometric" => Ok(Self::Geometric),
            "harmonic" => Ok(Self::Harmonic),
            "quadratic" => Ok(Self::Quadratic),
            other => Err(ToolkitError::UnsupportedMethod {
                kind: "mean",
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for MeanMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arithmetic => write!(f, "arithmetic"),
            Self::Geometric => write!(f, "geometric"),
            Self::Harmonic => write!(f, "harmonic"),
            Self::Quadratic => write!(f, "quadratic"),
        }
    }
}

/// Computes the mean of `data` selected by `method`.
///
/// Emptiness and positivity are checked before anything is computed.
///
/// ```
/// use data_science_toolkit::stats::{advanced_mean, MeanMethod};
///
/// let data = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(advanced_mean(&data, MeanMethod::Arithmetic).unwrap(), 3.0);
/// assert!((advanced_mean(&data, MeanMethod::Quadratic).unwrap() - 3.317).abs() < 1e-3);
/// assert!(advanced_mean(&[-1.0, 0.0, 1.0], MeanMethod::Geometric).is_err());
/// ```
pub fn advanced_mean(data: &[f64], method: MeanMethod) -> Result<f64> {
    if data.is_empty() {
        return Err(ToolkitError::EmptyInput);
    }
    if matches!(method, MeanMethod::Geometric | MeanMethod::Harmonic) {
        // `!(x > 0)` also rejects NaN
        if let Some(bad) = data.iter().find(|&&x| !(x > 0.0)) {
            return Err(ToolkitError::DomainError {
                method: method.to_string(),
                message: format!("all values must be strictly positive, found {bad}"),
            });
        }
    }

    let n = data.len() as f64;
    let value = match method {
        MeanMethod::Arithmetic => data.iter().sum::<f64>() / n,
        MeanMethod::Geometric => (data.iter().map(|x| x.ln()).sum::<f64>() / n).exp(),
        MeanMethod::Harmonic => n / data.iter().map(|x| 1.0 / x).sum::<f64>(),
        MeanMethod::Quadratic => (data.iter().map(|x| x * x).sum::<f64>() / n).sqrt(),
    };
    Ok(value)
}

// ── Tests ─────────────────────────────────────────────────────────────


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        // harmonic ≤ geometric ≤ arithmetic ≤ quadratic for positive data
        #[test]
        fn mean_inequality_chain(data in proptest::collection::vec(0.01_f64..1e4, 1..=50)) {
            let h = advanced_mean(&data, MeanMethod::Harmonic).unwrap();
            let g = advanced_mean(&data, MeanMethod::Geometric).unwrap();
            let a = advanced_mean(&data, MeanMethod::Arithmetic).unwrap();
            let q = advanced_mean(&data, MeanMethod::Quadratic).unwrap();
            let tol = 1e-9 * q.max(1.0);
            prop_assert!(h <= g + tol);
            prop_assert!(g <= a + tol);
            prop_assert!(a <= q + tol);
        }

        #[test]
        fn interval_contains_mean(data in proptest::collection::vec(-1e3_f64..1e3, 2..=60)) {
            let calc = StatisticalCalculator::new();
            let (lo, hi) = calc.confidence_interval(&data, DEFAULT_CONFIDENCE).unwrap();
            let mean = data.iter().sum::<f64>() / data.len() as f64;
            prop_assert!(lo <= hi);
            prop_assert!(lo <= mean + 1e-9 && mean <= hi + 1e-9);
        }
    }
}
