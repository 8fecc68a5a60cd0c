//! Series transforms
//!
//! Contains the element-wise transforms used around the forecast:
//! - Differencing of arbitrary order
//! - First difference with a zero-valued head
//! - Min-max rescaling into a closed interval

use crate::{MathError, Result};
use serde::Serialize;

/// Difference a series `order` times.
///
/// Each pass shortens the series by one element.
pub fn difference(values: &[f64], order: usize) -> Result<Vec<f64>> {
    if values.len() <= order {
        return Err(MathError::InsufficientData(format!(
            "Differencing of order {} needs more than {} values, have {}",
            order,
            order,
            values.len()
        )));
    }

    let mut result = values.to_vec();
    for _ in 0..order {
        result = result.windows(2).map(|w| w[1] - w[0]).collect();
    }

    Ok(result)
}

/// First difference that keeps the input length.
///
/// The first element has no predecessor inside the slice, so its
/// difference is 0.
pub fn first_difference_from_zero(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }

    std::iter::once(0.0)
        .chain(values.windows(2).map(|w| w[1] - w[0]))
        .collect()
}

/// Output of [`min_max_scale`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaledSeries {
    /// Rescaled values, same length as the input
    pub values: Vec<f64>,
    /// Set when the input had zero range and every value was mapped to the midpoint
    pub degenerate: bool,
}

/// Rescale `values` linearly so that the minimum maps to `lower` and the
/// maximum to `upper`.
///
/// A zero-range input cannot be rescaled; every output value is then the
/// midpoint of the target interval and `degenerate` is set.
pub fn min_max_scale(values: &[f64], lower: f64, upper: f64) -> Result<ScaledSeries> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot rescale an empty series".to_string(),
        ));
    }

    if !(lower < upper) {
        return Err(MathError::InvalidInput(format!(
            "Lower bound ({}) must be below upper bound ({})",
            lower, upper
        )));
    }

    if values.iter().any(|v| !v.is_finite()) {
        return Err(MathError::InvalidInput(
            "Series contains NaN or infinite values".to_string(),
        ));
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    let span = upper - lower;

    if range == 0.0 {
        return Ok(ScaledSeries {
            values: vec![lower + span / 2.0; values.len()],
            degenerate: true,
        });
    }

    // Divide first so the maximum maps to a factor of exactly 1
    let scaled = values
        .iter()
        .map(|v| lower + span * ((v - min) / range))
        .collect();

    Ok(ScaledSeries {
        values: scaled,
        degenerate: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn difference_shortens_by_order() {
        let values = [1.0, 4.0, 9.0, 16.0, 25.0];

        assert_eq!(difference(&values, 0).unwrap(), values.to_vec());
        assert_eq!(difference(&values, 1).unwrap(), vec![3.0, 5.0, 7.0, 9.0]);
        assert_eq!(difference(&values, 2).unwrap(), vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn difference_rejects_short_input() {
        assert!(matches!(
            difference(&[1.0], 1),
            Err(MathError::InsufficientData(_))
        ));
    }

    #[test]
    fn first_difference_keeps_length() {
        let diffs = first_difference_from_zero(&[10.0, 12.0, 11.0]);
        assert_eq!(diffs, vec![0.0, 2.0, -1.0]);
        assert!(first_difference_from_zero(&[]).is_empty());
        assert_eq!(first_difference_from_zero(&[7.0]), vec![0.0]);
    }

    #[test]
    fn min_max_scale_hits_both_bounds() {
        let scaled = min_max_scale(&[0.0, 2.0, -1.0, 6.0], 0.0, 100.0).unwrap();

        assert!(!scaled.degenerate);
        assert_eq!(scaled.values[2], 0.0);
        assert_eq!(scaled.values[3], 100.0);
        assert_relative_eq!(scaled.values[0], 100.0 / 7.0, epsilon = 1e-12);
        assert_relative_eq!(scaled.values[1], 300.0 / 7.0, epsilon = 1e-12);
    }

    #[test]
    fn min_max_scale_stays_inside_bounds() {
        for step in [0.007, 0.081, 0.1, 0.3] {
            let scaled = min_max_scale(&[0.0, step], 0.0, 100.0).unwrap();

            assert_eq!(scaled.values, vec![0.0, 100.0]);
        }

        let scaled = min_max_scale(&[0.0, 0.007, 0.007, 0.003, 0.007], 0.0, 100.0).unwrap();
        assert!(scaled.values.iter().all(|v| (0.0..=100.0).contains(v)));
        assert_eq!(scaled.values[1], 100.0);
    }

    #[test]
    fn min_max_scale_zero_range_maps_to_midpoint() {
        let scaled = min_max_scale(&[3.0; 7], 0.0, 100.0).unwrap();

        assert!(scaled.degenerate);
        assert_eq!(scaled.values, vec![50.0; 7]);
    }

    #[test]
    fn min_max_scale_validates_input() {
        assert!(min_max_scale(&[], 0.0, 100.0).is_err());
        assert!(min_max_scale(&[1.0, 2.0], 100.0, 0.0).is_err());
        assert!(min_max_scale(&[1.0, f64::NAN], 0.0, 100.0).is_err());
    }
}
