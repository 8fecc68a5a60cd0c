//! Fits the forecasting model and labels the forecast with future trading dates

use crate::data::PriceSeries;
use crate::error::{ForecastError, Result};
use crate::models::arima::Arima;
use crate::models::{ForecastModel, TrainedForecastModel};
use crate::utils::business_days_after;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

/// Number of business days forecast past the last observation
pub const FORECAST_HORIZON: usize = 7;

/// One step of the forecast
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    /// Position in the extended series; the first point has index `len(series)`
    pub index: usize,
    /// Business day this step is labeled with
    pub date: NaiveDate,
    /// Predicted closing price
    pub predicted_close: f64,
}

/// Runs one fixed-order model over a price series
#[derive(Debug, Clone)]
pub struct ForecastEngine<M: ForecastModel = Arima> {
    model: M,
    horizon: usize,
}

impl ForecastEngine<Arima> {
    /// ARIMA(5,1,0) with a seven day horizon
    pub fn new() -> Self {
        Self::with_model(Arima::default())
    }
}

impl Default for ForecastEngine<Arima> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: ForecastModel> ForecastEngine<M> {
    /// Engine around a custom model, seven day horizon
    pub fn with_model(model: M) -> Self {
        Self {
            model,
            horizon: FORECAST_HORIZON,
        }
    }

    /// The wrapped model
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Number of forecast steps produced
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Fit the model to `series` and forecast the next business days.
    ///
    /// The model is trained fresh on every call and dropped afterwards.
    pub fn forecast(&self, series: &PriceSeries) -> Result<Vec<ForecastPoint>> {
        let last_date = series.last_date().ok_or_else(|| {
            ForecastError::FitError("Cannot fit a model to an empty series".to_string())
        })?;

        let trained = self.model.train(series)?;
        let forecast = trained.forecast(self.horizon)?;

        if forecast.horizons() != self.horizon {
            return Err(ForecastError::ValidationError(format!(
                "{} returned {} steps, expected {}",
                trained.name(),
                forecast.horizons(),
                self.horizon
            )));
        }

        if forecast.values().iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::FitError(format!(
                "{} produced a non-finite forecast",
                trained.name()
            )));
        }

        let dates = business_days_after(last_date, self.horizon);
        let offset = series.len();

        let points: Vec<ForecastPoint> = forecast
            .into_values()
            .into_iter()
            .zip(dates)
            .enumerate()
            .map(|(step, (predicted_close, date))| ForecastPoint {
                index: offset + step,
                date,
                predicted_close,
            })
            .collect();

        debug!(points = ?points, "forecast points");
        info!(
            model = self.model.name(),
            observations = series.len(),
            first_date = ?points.first().map(|p| p.date),
            "forecast complete"
        );

        Ok(points)
    }
}
