//! Result table handed to the presentation layer

use crate::engine::ForecastPoint;
use crate::error::{ForecastError, Result};
use crate::momentum::MomentumSeries;
use crate::signals::SignalStatus;
use crate::utils::days_since_unix_epoch;
use chrono::NaiveDate;
use polars::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

/// One forecast step with its momentum and signal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    /// Forecast business day
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    /// Predicted closing price
    #[serde(rename = "Predicted_Close")]
    pub predicted_close: f64,
    /// Momentum oscillator value
    #[serde(rename = "Momentum_Indicator")]
    pub momentum: f64,
    /// Signal classification of `momentum`
    #[serde(rename = "Status")]
    pub status: SignalStatus,
}

/// Forecast rows ordered by date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastTable {
    ticker: String,
    rows: Vec<ResultRow>,
}

impl ForecastTable {
    /// Ticker the forecast was made for
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Rows, earliest date first
    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Convert to a polars DataFrame with one column per row field
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let dates: Vec<i32> = self.rows.iter().map(|r| days_since_unix_epoch(r.date)).collect();
        let statuses: Vec<&str> = self.rows.iter().map(|r| r.status.as_str()).collect();

        let df = DataFrame::new(vec![
            Series::new("Date", dates).cast(&DataType::Date)?,
            Series::new(
                "Predicted_Close",
                self.rows.iter().map(|r| r.predicted_close).collect::<Vec<f64>>(),
            ),
            Series::new(
                "Momentum_Indicator",
                self.rows.iter().map(|r| r.momentum).collect::<Vec<f64>>(),
            ),
            Series::new("Status", statuses),
        ])?;

        Ok(df)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the rows as CSV with a header line
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut df = self.to_dataframe()?;
        let mut file = File::create(path)?;
        CsvWriter::new(&mut file).has_header(true).finish(&mut df)?;
        Ok(())
    }
}

/// Joins the per-step outputs of the pipeline into a [`ForecastTable`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultAssembler;

impl ResultAssembler {
    /// Zip forecast points, momentum and statuses step by step.
    ///
    /// All three inputs must have the same length and the point dates must
    /// be strictly increasing.
    pub fn assemble(
        &self,
        ticker: &str,
        points: &[ForecastPoint],
        momentum: &MomentumSeries,
        statuses: &[SignalStatus],
    ) -> Result<ForecastTable> {
        if points.len() != momentum.len() || points.len() != statuses.len() {
            return Err(ForecastError::ValidationError(format!(
                "Mismatched step counts: {} points, {} momentum values, {} statuses",
                points.len(),
                momentum.len(),
                statuses.len()
            )));
        }

        if points.windows(2).any(|w| w[0].date >= w[1].date) {
            return Err(ForecastError::ValidationError(
                "Forecast dates must be strictly increasing".to_string(),
            ));
        }

        let rows = points
            .iter()
            .zip(&momentum.values)
            .zip(statuses)
            .map(|((point, &momentum), &status)| ResultRow {
                date: point.date,
                predicted_close: point.predicted_close,
                momentum,
                status,
            })
            .collect();

        Ok(ForecastTable {
            ticker: ticker.to_string(),
            rows,
        })
    }
}
