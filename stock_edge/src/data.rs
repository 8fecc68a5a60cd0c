//! Daily price history handling

use crate::error::{ForecastError, Result};
use crate::utils::days_since_unix_epoch;
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One daily OHLCV bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Trading date
    pub date: NaiveDate,
    /// Open price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Close price
    pub close: f64,
    /// Volume
    pub volume: u64,
}

impl PriceBar {
    /// Bar where every price field is the close
    pub fn from_close(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            open: close,
            high: close,
            low: close,
            close,
            volume: 0,
        }
    }
}

/// Observed daily history of one ticker.
///
/// Bars are strictly increasing by date and every close is finite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    ticker: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Build a series from raw provider bars.
    ///
    /// Drops bars dated before `start_date` and bars with a non-finite
    /// close, sorts by date and keeps the last bar seen for a duplicated date.
    pub fn from_bars(ticker: impl Into<String>, bars: Vec<PriceBar>, start_date: NaiveDate) -> Self {
        let mut by_date = BTreeMap::new();
        for bar in bars {
            if bar.date < start_date || !bar.close.is_finite() {
                continue;
            }
            by_date.insert(bar.date, bar);
        }

        Self {
            ticker: ticker.into(),
            bars: by_date.into_values().collect(),
        }
    }

    /// Create a series from dates and closing prices.
    ///
    /// Unlike [`PriceSeries::from_bars`] this does not repair its input: dates
    /// must be strictly increasing and the lengths must match.
    pub fn new(ticker: impl Into<String>, dates: Vec<NaiveDate>, closes: Vec<f64>) -> Result<Self> {
        if dates.len() != closes.len() {
            return Err(ForecastError::ValidationError(format!(
                "Dates length ({}) doesn't match closes length ({})",
                dates.len(),
                closes.len()
            )));
        }

        if dates.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ForecastError::ValidationError(
                "Dates must be strictly increasing".to_string(),
            ));
        }

        if let Some(bad) = closes.iter().find(|c| !c.is_finite()) {
            return Err(ForecastError::ValidationError(format!(
                "Closing prices must be finite, got {}",
                bad
            )));
        }

        let bars = dates
            .into_iter()
            .zip(closes)
            .map(|(date, close)| PriceBar::from_close(date, close))
            .collect();

        Ok(Self {
            ticker: ticker.into(),
            bars,
        })
    }

    /// An empty series for `ticker`
    pub fn empty(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            bars: Vec::new(),
        }
    }

    /// Ticker symbol
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// All bars, oldest first
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// Closing prices, oldest first
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Trading dates, oldest first
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    /// Date of the most recent bar
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }

    /// Most recent close
    pub fn last_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Number of bars
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Convert to a polars DataFrame with `date`, `open`, `high`, `low`,
    /// `close` and `volume` columns
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let dates: Vec<i32> = self.bars.iter().map(|b| days_since_unix_epoch(b.date)).collect();
        let date_series = Series::new("date", dates).cast(&DataType::Date)?;

        let df = DataFrame::new(vec![
            date_series,
            Series::new("open", self.bars.iter().map(|b| b.open).collect::<Vec<f64>>()),
            Series::new("high", self.bars.iter().map(|b| b.high).collect::<Vec<f64>>()),
            Series::new("low", self.bars.iter().map(|b| b.low).collect::<Vec<f64>>()),
            Series::new("close", self.closes()),
            Series::new("volume", self.bars.iter().map(|b| b.volume).collect::<Vec<u64>>()),
        ])?;

        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn from_bars_sorts_filters_and_dedups() {
        let bars = vec![
            PriceBar::from_close(date(2024, 1, 4), 103.0),
            PriceBar::from_close(date(2024, 1, 2), 101.0),
            PriceBar::from_close(date(2023, 12, 29), 99.0),
            PriceBar::from_close(date(2024, 1, 3), f64::NAN),
            PriceBar::from_close(date(2024, 1, 2), 101.5),
        ];

        let series = PriceSeries::from_bars("AAPL", bars, date(2024, 1, 1));

        assert_eq!(series.len(), 2);
        assert_eq!(series.dates(), vec![date(2024, 1, 2), date(2024, 1, 4)]);
        assert_eq!(series.closes(), vec![101.5, 103.0]);
    }

    #[test]
    fn new_rejects_unordered_dates() {
        let result = PriceSeries::new(
            "AAPL",
            vec![date(2024, 1, 3), date(2024, 1, 2)],
            vec![1.0, 2.0],
        );
        assert!(result.is_err());
    }
}
