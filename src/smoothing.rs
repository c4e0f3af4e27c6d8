//! Moving averages.
//!
//! - **Simple**: mean of each full window of `w` consecutive values
//!   (valid convolution, no padding), producing `n − w + 1` values.
//! - **Exponential**: `α = 2 / (w + 1)`, seeded with the first
//!   observation: `s₀ = x₀`, `sᵢ = α·xᵢ + (1 − α)·sᵢ₋₁`, producing `n` values.
//!
//! ```
//! use data_science_toolkit::smoothing::{moving_average, MovingAverageMethod};
//!
//! let data: Vec<f64> = (1..=10).map(f64::from).collect();
//! let sma = moving_average(&data, 3, MovingAverageMethod::Simple).unwrap();
//! assert_eq!(sma.len(), 8);
//! assert_eq!(sma[0], 2.0);
//!
//! let ema = moving_average(&data, 3, MovingAverageMethod::Exponential).unwrap();
//! assert_eq!(ema.len(), 10);
//! assert_eq!(ema[0], 1.0);
//! ```

use crate::error::{Result, ToolkitError};
use std::fmt;
use std::str::FromStr;

/// Moving-average variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovingAverageMethod {
    /// Equal-weight sliding window.
    #[default]
    Simple,
    /// Exponentially weighted, seeded with the first value.
    Exponential,
}

impl FromStr for MovingAverageMethod {
    type Err = ToolkitError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "simple" => Ok(Self::Simple),
            "exponential" => Ok(Self::Exponential),
            other => Err(ToolkitError::UnsupportedMethod {
                kind: "moving average",
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for MovingAverageMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple => write!(f, "simple"),
            Self::Exponential => write!(f, "exponential"),
        }
    }
}

/// Smooths `data` with a moving average over `window` observations.
///
/// Fails with `InvalidWindow` unless `0 < window <= data.len()`.
pub fn moving_average(data: &[f64], window: usize, method: MovingAverageMethod) -> Result<Vec<f64>> {
    if window == 0 || window > data.len() {
        return Err(ToolkitError::InvalidWindow {
            window,
            len: data.len(),
        });
    }
    Ok(match method {
        MovingAverageMethod::Simple => simple(data, window),
        MovingAverageMethod::Exponential => exponential(data, window),
    })
}

fn simple(data: &[f64], window: usize) -> Vec<f64> {
    let w = window as f64;
    data.windows(window)
        .map(|win| win.iter().sum::<f64>() / w)
        .collect()
}

fn exponential(data: &[f64], window: usize) -> Vec<f64> {
    let alpha = 2.0 / (window as f64 + 1.0);
    let mut out = Vec::with_capacity(data.len());
    let mut prev = data[0];
    out.push(prev);
    for &x in &data[1..] {
        prev = alpha * x + (1.0 - alpha) * prev;
        out.push(prev);
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn one_to_ten() -> Vec<f64> {
        (1..=10).map(f64::from).collect()
    }

    #[test]
    fn simple_valid_windows() {
        let out = moving_average(&one_to_ten(), 3, MovingAverageMethod::Simple).unwrap();
        assert_eq!(out, vec![2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn simple_full_window_is_mean() {
        let out = moving_average(&[2.0, 4.0, 9.0], 3, MovingAverageMethod::Simple).unwrap();
        assert_eq!(out, vec![5.0]);
    }

    #[test]
    fn exponential_seeded_with_first_value() {
        // window 3 → alpha 0.5
        let out = moving_average(&[4.0, 8.0, 0.0], 3, MovingAverageMethod::Exponential).unwrap();
        assert_eq!(out, vec![4.0, 6.0, 3.0]);
    }

    #[test]
    fn window_one_is_identity() {
        let data = [3.0, -1.0, 7.5];
        assert_eq!(
            moving_average(&data, 1, MovingAverageMethod::Simple).unwrap(),
            data.to_vec()
        );
        assert_eq!(
            moving_average(&data, 1, MovingAverageMethod::Exponential).unwrap(),
            data.to_vec()
        );
    }

    #[test]
    fn invalid_windows() {
        let data = one_to_ten();
        for window in [0, 11] {
            let err = moving_average(&data, window, MovingAverageMethod::Simple).unwrap_err();
            assert_eq!(err, ToolkitError::InvalidWindow { window, len: 10 });
        }
        assert!(moving_average(&[], 1, MovingAverageMethod::Exponential).is_err());
    }

    #[test]
    fn parse_method_names() {
        assert_eq!(
            "exponential".parse::<MovingAverageMethod>(),
            Ok(MovingAverageMethod::Exponential)
        );
        assert!(matches!(
            "weighted".parse::<MovingAverageMethod>(),
            Err(ToolkitError::UnsupportedMethod { .. })
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn output_lengths(
            data in proptest::collection::vec(-1e3_f64..1e3, 1..=50),
            w in 1_usize..=50,
        ) {
            prop_assume!(w <= data.len());
            let sma = moving_average(&data, w, MovingAverageMethod::Simple).unwrap();
            let ema = moving_average(&data, w, MovingAverageMethod::Exponential).unwrap();
            prop_assert_eq!(sma.len(), data.len() - w + 1);
            prop_assert_eq!(ema.len(), data.len());
            prop_assert_eq!(ema[0], data[0]);
        }
    }
}
