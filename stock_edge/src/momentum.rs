//! Momentum oscillator derived from the forecast path
//!
//! The oscillator is the first difference of the forecast (0 for the first
//! step, the last observed close is not used) rescaled onto 0-100 with
//! min-max normalization over the forecast window. When every difference is
//! equal the range is zero and every step is assigned [`DEGENERATE_MOMENTUM`].

use crate::engine::ForecastPoint;
use crate::error::{ForecastError, Result};
use serde::Serialize;
use tracing::warn;
use trade_math::{first_difference_from_zero, min_max_scale};

/// Lower bound of the oscillator
pub const MOMENTUM_MIN: f64 = 0.0;
/// Upper bound of the oscillator
pub const MOMENTUM_MAX: f64 = 100.0;
/// Value assigned to every step of a zero-range forecast
pub const DEGENERATE_MOMENTUM: f64 = 50.0;

/// Oscillator values, one per forecast point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MomentumSeries {
    /// Unscaled step-to-step differences, first is always 0
    pub differences: Vec<f64>,
    /// Scaled oscillator values
    pub values: Vec<f64>,
    /// All differences were equal, so every value is the midpoint
    pub degenerate: bool,
}

impl MomentumSeries {
    /// Number of values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Turns forecast points into a bounded momentum oscillator
#[derive(Debug, Clone, Copy, Default)]
pub struct MomentumTransform;

impl MomentumTransform {
    /// Compute the oscillator over `points`
    pub fn apply(&self, points: &[ForecastPoint]) -> Result<MomentumSeries> {
        let closes: Vec<f64> = points.iter().map(|p| p.predicted_close).collect();
        momentum_from_values(&closes)
    }
}

/// Compute the oscillator over raw forecast values
pub fn momentum_from_values(values: &[f64]) -> Result<MomentumSeries> {
    if values.is_empty() {
        return Err(ForecastError::ValidationError(
            "Momentum requires at least one forecast value".to_string(),
        ));
    }

    let differences = first_difference_from_zero(values);
    let scaled = min_max_scale(&differences, MOMENTUM_MIN, MOMENTUM_MAX)?;

    if scaled.degenerate {
        warn!(
            steps = values.len(),
            "forecast differences have zero range, momentum set to {}", DEGENERATE_MOMENTUM
        );
    }

    Ok(MomentumSeries {
        differences,
        values: scaled.values,
        degenerate: scaled.degenerate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_difference_is_zero() {
        let momentum = momentum_from_values(&[5.0, 9.0, 4.0]).unwrap();
        assert_eq!(momentum.differences[0], 0.0);
        assert_eq!(momentum.len(), 3);
    }

    #[test]
    fn single_value_is_degenerate() {
        let momentum = momentum_from_values(&[5.0]).unwrap();
        assert!(momentum.degenerate);
        assert_eq!(momentum.values, vec![DEGENERATE_MOMENTUM]);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(momentum_from_values(&[]).is_err());
    }
}
