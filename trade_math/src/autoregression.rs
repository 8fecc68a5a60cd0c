//! Autoregressive estimation
//!
//! Yule-Walker estimation of AR(p) coefficients: sample autocovariances
//! followed by the Levinson-Durbin recursion.

use crate::{MathError, Result};
use serde::Serialize;

/// Sample autocovariance at lags `0..=max_lag` around a fixed `mean`.
///
/// Uses the biased estimator (divides by `n` at every lag) so the
/// resulting Toeplitz matrix is positive semi-definite. Lags at or beyond
/// the series length are 0.
pub fn autocovariance(values: &[f64], max_lag: usize, mean: f64) -> Result<Vec<f64>> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot compute autocovariance of an empty series".to_string(),
        ));
    }

    let n = values.len() as f64;
    let centered: Vec<f64> = values.iter().map(|v| v - mean).collect();

    let acov = (0..=max_lag)
        .map(|lag| {
            if lag >= centered.len() {
                return 0.0;
            }
            centered[lag..]
                .iter()
                .zip(centered.iter())
                .map(|(a, b)| a * b)
                .sum::<f64>()
                / n
        })
        .collect();

    Ok(acov)
}

/// Solution of the Yule-Walker equations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YuleWalkerSolution {
    /// AR coefficients, lag 1 first
    pub coefficients: Vec<f64>,
    /// Innovation (one-step prediction error) variance
    pub innovation_variance: f64,
    /// Partial autocorrelations produced along the recursion
    pub reflection_coefficients: Vec<f64>,
}

/// Solve the Yule-Walker equations of the given `order` with the
/// Levinson-Durbin recursion.
///
/// `acov` must hold autocovariances for lags `0..=order`. Fails when the
/// lag-0 variance is not positive (singular system) or when a reflection
/// coefficient leaves the open unit interval (non-stationary solution).
pub fn levinson_durbin(acov: &[f64], order: usize) -> Result<YuleWalkerSolution> {
    if order == 0 {
        return Err(MathError::InvalidInput(
            "AR order must be greater than zero".to_string(),
        ));
    }

    if acov.len() < order + 1 {
        return Err(MathError::InsufficientData(format!(
            "Need autocovariances for {} lags, have {}",
            order + 1,
            acov.len()
        )));
    }

    let variance = acov[0];
    if !variance.is_finite() || variance <= 0.0 {
        return Err(MathError::CalculationError(
            "Series has zero variance, Yule-Walker system is singular".to_string(),
        ));
    }

    let mut coefficients = vec![0.0; order];
    let mut reflection_coefficients = Vec::with_capacity(order);
    let mut error = variance;

    for k in 0..order {
        let mut acc = acov[k + 1];
        for j in 0..k {
            acc -= coefficients[j] * acov[k - j];
        }

        let kappa = acc / error;
        if !kappa.is_finite() || kappa.abs() >= 1.0 {
            return Err(MathError::CalculationError(format!(
                "Reflection coefficient {} at lag {} is outside (-1, 1)",
                kappa,
                k + 1
            )));
        }

        let previous = coefficients.clone();
        coefficients[k] = kappa;
        for j in 0..k {
            coefficients[j] = previous[j] - kappa * previous[k - 1 - j];
        }

        error *= 1.0 - kappa * kappa;
        reflection_coefficients.push(kappa);
    }

    if !error.is_finite() || error <= 0.0 {
        return Err(MathError::CalculationError(
            "Innovation variance is not positive".to_string(),
        ));
    }

    Ok(YuleWalkerSolution {
        coefficients,
        innovation_variance: error,
        reflection_coefficients,
    })
}
