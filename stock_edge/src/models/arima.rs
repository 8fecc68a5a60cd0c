//! ARIMA models for time series forecasting
//!
//! Only the autoregressive-integrated family (`q = 0`) is estimated. The
//! series is differenced `d` times and the AR(p) coefficients of the
//! differenced series are the Yule-Walker solution, obtained with the
//! Levinson-Durbin recursion. With `d >= 1` the differenced series is
//! treated as zero-mean, so no constant term is fitted.

use crate::data::PriceSeries;
use crate::error::{ForecastError, Result};
use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
use statrs::statistics::Statistics;
use tracing::debug;
use trade_math::{autocovariance, difference, levinson_durbin};

/// Largest supported AR order
const MAX_AR_ORDER: usize = 10;
/// Largest supported differencing order
const MAX_DIFFERENCING: usize = 2;

/// ARIMA model (AutoRegressive Integrated Moving Average)
#[derive(Debug, Clone)]
pub struct Arima {
    /// Name of the model
    name: String,
    /// AR order (p)
    p: usize,
    /// Differencing order (d)
    d: usize,
    /// MA order (q)
    q: usize,
}

/// Trained ARIMA model
#[derive(Debug, Clone)]
pub struct TrainedArima {
    /// Name of the model
    name: String,
    /// AR order (p)
    p: usize,
    /// Differencing order (d)
    d: usize,
    /// Fitted AR coefficients, lag 1 first
    ar_coefficients: Vec<f64>,
    /// Mean removed from the differenced series before fitting
    mean: f64,
    /// Innovation variance from the Yule-Walker solution
    sigma2: f64,
    /// Last observed value at each differencing level, level 0 first
    level_tails: Vec<f64>,
    /// The `d`-times differenced series
    differenced: Vec<f64>,
    /// In-sample one-step residuals of the differenced series
    residuals: Vec<f64>,
}

impl Arima {
    /// Create a new ARIMA model
    pub fn new(p: usize, d: usize, q: usize) -> Result<Self> {
        if p > MAX_AR_ORDER {
            return Err(ForecastError::InvalidParameter(format!(
                "AR order must be <= {}, got {}",
                MAX_AR_ORDER, p
            )));
        }
        if d > MAX_DIFFERENCING {
            return Err(ForecastError::InvalidParameter(format!(
                "Differencing order must be <= {}, got {}",
                MAX_DIFFERENCING, d
            )));
        }
        if q != 0 {
            return Err(ForecastError::InvalidParameter(
                "Moving-average terms are not supported, q must be 0".to_string(),
            ));
        }

        Ok(Self {
            name: format!("ARIMA({},{},{})", p, d, q),
            p,
            d,
            q,
        })
    }

    /// The (p, d, q) order
    pub fn order(&self) -> (usize, usize, usize) {
        (self.p, self.d, self.q)
    }

    /// Fewest observations the model can be fitted on
    pub fn min_observations(&self) -> usize {
        (self.p + self.d).max(self.d + 2)
    }

    /// Fit the model to raw values
    pub fn fit(&self, values: &[f64]) -> Result<TrainedArima> {
        let required = self.min_observations();
        if values.len() < required {
            return Err(ForecastError::FitError(format!(
                "Insufficient data for {}. Need at least {} observations, have {}.",
                self.name,
                required,
                values.len()
            )));
        }

        if values.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::FitError(
                "Series contains NaN or infinite values".to_string(),
            ));
        }

        let mut level_tails = Vec::with_capacity(self.d);
        let mut level = values.to_vec();
        for _ in 0..self.d {
            level_tails.push(level[level.len() - 1]);
            level = difference(&level, 1).map_err(|e| ForecastError::FitError(e.to_string()))?;
        }
        let differenced = level;

        let mean = if self.d == 0 {
            differenced.iter().mean()
        } else {
            0.0
        };

        let acov = autocovariance(&differenced, self.p, mean)
            .map_err(|e| ForecastError::FitError(e.to_string()))?;

        let (ar_coefficients, sigma2) = if self.p == 0 {
            if acov[0] <= 0.0 {
                return Err(ForecastError::FitError(
                    "Series has zero variance after differencing".to_string(),
                ));
            }
            (Vec::new(), acov[0])
        } else {
            let solution = levinson_durbin(&acov, self.p)
                .map_err(|e| ForecastError::FitError(format!("{} did not converge: {}", self.name, e)))?;
            (solution.coefficients, solution.innovation_variance)
        };

        let residuals = (self.p..differenced.len())
            .map(|t| {
                let predicted: f64 = ar_coefficients
                    .iter()
                    .enumerate()
                    .map(|(j, phi)| phi * (differenced[t - j - 1] - mean))
                    .sum();
                differenced[t] - mean - predicted
            })
            .collect();

        debug!(
            model = %self.name,
            coefficients = ?ar_coefficients,
            sigma2,
            "fitted autoregressive coefficients"
        );

        Ok(TrainedArima {
            name: self.name.clone(),
            p: self.p,
            d: self.d,
            ar_coefficients,
            mean,
            sigma2,
            level_tails,
            differenced,
            residuals,
        })
    }
}

impl Default for Arima {
    /// ARIMA(5,1,0)
    fn default() -> Self {
        Self {
            name: "ARIMA(5,1,0)".to_string(),
            p: 5,
            d: 1,
            q: 0,
        }
    }
}

impl ForecastModel for Arima {
    type Trained = TrainedArima;

    fn train(&self, data: &PriceSeries) -> Result<TrainedArima> {
        self.fit(&data.closes())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedArima {
    /// The (p, d, q) order the model was fitted with
    pub fn order(&self) -> (usize, usize, usize) {
        (self.p, self.d, 0)
    }

    /// Fitted AR coefficients, lag 1 first
    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar_coefficients
    }

    /// Innovation variance of the fitted AR process
    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    /// In-sample one-step residuals on the differenced scale
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Sample variance of the in-sample residuals
    pub fn residual_variance(&self) -> Option<f64> {
        if self.residuals.len() < 2 {
            return None;
        }
        Some(self.residuals.iter().variance())
    }

    /// Iterate the AR recursion on the differenced scale
    fn forecast_differenced(&self, horizon: usize) -> Vec<f64> {
        let mut history: Vec<f64> = self.differenced.iter().map(|v| v - self.mean).collect();
        let mut forecasts = Vec::with_capacity(horizon);

        for _ in 0..horizon {
            let next: f64 = self
                .ar_coefficients
                .iter()
                .enumerate()
                .map(|(j, phi)| {
                    history
                        .len()
                        .checked_sub(j + 1)
                        .map(|idx| phi * history[idx])
                        .unwrap_or(0.0)
                })
                .sum();
            history.push(next);
            forecasts.push(next + self.mean);
        }

        forecasts
    }
}

impl TrainedForecastModel for TrainedArima {
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        let mut values = self.forecast_differenced(horizon);

        // Undo each differencing pass, innermost level first
        for tail in self.level_tails.iter().rev() {
            let mut last = *tail;
            for value in values.iter_mut() {
                last += *value;
                *value = last;
            }
        }

        if values.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::FitError(format!(
                "{} produced a non-finite forecast",
                self.name
            )));
        }

        ForecastResult::new(values, horizon)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_is_five_one_zero() {
        let model = Arima::default();
        assert_eq!(model.order(), (5, 1, 0));
        assert_eq!(model.name(), "ARIMA(5,1,0)");
        assert_eq!(model.min_observations(), 6);
    }

    #[test]
    fn random_walk_forecast_is_flat() {
        let model = Arima::new(0, 1, 0).unwrap();
        let trained = model.fit(&[10.0, 11.0, 10.5, 12.0]).unwrap();
        let forecast = trained.forecast(3).unwrap();

        assert_eq!(forecast.values(), &[12.0, 12.0, 12.0]);
    }

    #[test]
    fn integration_accumulates_from_last_close() {
        // Alternating differences give a strongly negative lag-1 coefficient
        let values = [100.0, 101.0, 100.0, 101.0, 100.0, 101.0, 100.0, 101.0];
        let trained = Arima::new(1, 1, 0).unwrap().fit(&values).unwrap();

        let phi = trained.ar_coefficients()[0];
        assert!(phi < -0.5);
        assert_eq!(trained.order(), (1, 1, 0));

        let forecast = trained.forecast(2).unwrap();
        // last difference is +1, so the next difference is phi * 1
        assert_relative_eq!(forecast.values()[0], 101.0 + phi, epsilon = 1e-12);
        assert_relative_eq!(forecast.values()[1], 101.0 + phi + phi * phi, epsilon = 1e-12);
    }

    #[test]
    fn rejects_moving_average_terms() {
        assert!(Arima::new(1, 1, 1).is_err());
        assert!(Arima::new(11, 1, 0).is_err());
        assert!(Arima::new(1, 3, 0).is_err());
    }
}
