//! Rescaling of numeric series.
//!
//! Three methods are supported. Each maps a series to a series of the same
//! length; when the spread statistic of a method is zero (a constant
//! series), the result is all zeros rather than an error.
//!
//! | Method | Formula | Degenerate when |
//! |--------|---------|-----------------|
//! | [`MinMax`](NormalizationMethod::MinMax) | `(x − min) / (max − min)` | `max == min` |
//! | [`ZScore`](NormalizationMethod::ZScore) | `(x − mean) / σ` (population) | `σ == 0` |
//! | [`Robust`](NormalizationMethod::Robust) | `(x − median) / MAD` | `MAD == 0` |
//!
//! ```
//! use data_science_toolkit::normalize::{normalize, NormalizationMethod};
//!
//! let scaled = normalize(&[2.0, 4.0, 6.0], NormalizationMethod::MinMax);
//! assert_eq!(scaled, vec![0.0, 0.5, 1.0]);
//!
//! let flat = normalize(&[7.0, 7.0], NormalizationMethod::ZScore);
//! assert_eq!(flat, vec![0.0, 0.0]);
//! ```

use crate::error::ToolkitError;
use std::fmt;
use std::str::FromStr;

/// Rescaling method for [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizationMethod {
    /// Linear map onto `[0, 1]`.
    #[default]
    MinMax,
    /// Standard score with the population standard deviation.
    ZScore,
    /// Median / median-absolute-deviation scaling.
    Robust,
}

impl FromStr for NormalizationMethod {
    type Err = ToolkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minmax" => Ok(Self::MinMax),
            "zscore" => Ok(Self::ZScore),
            "robust" => Ok(Self::Robust),
            other => Err(ToolkitError::UnsupportedMethod {
                kind: "normalization",
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for NormalizationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinMax => write!(f, "minmax"),
            Self::ZScore => write!(f, "zscore"),
            Self::Robust => write!(f, "robust"),
        }
    }
}

/// Rescales `data` with `method`.
///
/// Returns an empty vector for empty input and an all-zero vector of the
/// same length when the method's spread is zero.
pub fn normalize(data: &[f64], method: NormalizationMethod) -> Vec<f64> {
    if data.is_empty() {
        return Vec::new();
    }
    let (center, scale) = match method {
        NormalizationMethod::MinMax => {
            let min = data.iter().copied().fold(f64::INFINITY, f64::min);
            let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            (min, max - min)
        }
        NormalizationMethod::ZScore => {
            let mean = u_numflow::stats::mean(data).unwrap_or(f64::NAN);
            let std = u_numflow::stats::population_std_dev(data).unwrap_or(f64::NAN);
            (mean, std)
        }
        NormalizationMethod::Robust => {
            let median = u_numflow::stats::median(data).unwrap_or(f64::NAN);
            let abs_devs: Vec<f64> = data.iter().map(|&x| (x - median).abs()).collect();
            let mad = u_numflow::stats::median(&abs_devs).unwrap_or(f64::NAN);
            (median, mad)
        }
    };

    if scale == 0.0 {
        return vec![0.0; data.len()];
    }
    data.iter().map(|&x| (x - center) / scale).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minmax_basic() {
        let out = normalize(&[1.0, 2.0, 3.0, 4.0, 5.0], NormalizationMethod::MinMax);
        assert_eq!(out, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn minmax_constant_is_zero() {
        let out = normalize(&[5.0, 5.0, 5.0], NormalizationMethod::MinMax);
        assert_eq!(out, vec![0.0; 3]);
    }

    #[test]
    fn single_value_is_zero_for_every_method() {
        for method in [
            NormalizationMethod::MinMax,
            NormalizationMethod::ZScore,
            NormalizationMethod::Robust,
        ] {
            assert_eq!(normalize(&[42.0], method), vec![0.0], "{method}");
        }
    }

    #[test]
    fn zscore_uses_population_std() {
        // mean = 5, population std = 2
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let out = normalize(&data, NormalizationMethod::ZScore);
        assert!((out[0] - (-1.5)).abs() < 1e-12);
        assert!((out[7] - 2.0).abs() < 1e-12);
        let mean: f64 = out.iter().sum::<f64>() / out.len() as f64;
        assert!(mean.abs() < 1e-12);
    }

    #[test]
    fn robust_median_mad() {
        // median = 3, |x - 3| = [2, 1, 0, 1, 97] → MAD = 1
        let out = normalize(&[1.0, 2.0, 3.0, 4.0, 100.0], NormalizationMethod::Robust);
        assert_eq!(out, vec![-2.0, -1.0, 0.0, 1.0, 97.0]);
    }

    #[test]
    fn robust_zero_mad_is_zero() {
        // More than half the values equal the median → MAD = 0
        let out = normalize(&[3.0, 3.0, 3.0, 10.0], NormalizationMethod::Robust);
        assert_eq!(out, vec![0.0; 4]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(normalize(&[], NormalizationMethod::MinMax).is_empty());
    }

    #[test]
    fn parse_method_names() {
        assert_eq!("minmax".parse::<NormalizationMethod>(), Ok(NormalizationMethod::MinMax));
        assert_eq!("zscore".parse::<NormalizationMethod>(), Ok(NormalizationMethod::ZScore));
        assert_eq!("robust".parse::<NormalizationMethod>(), Ok(NormalizationMethod::Robust));
        let err = "log".parse::<NormalizationMethod>().unwrap_err();
        assert_eq!(
            err,
            ToolkitError::UnsupportedMethod {
                kind: "normalization",
                name: "log".into()
            }
        );
    }
}
