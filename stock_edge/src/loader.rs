//! Loads and normalizes the observed price history for one ticker

use crate::data::PriceSeries;
use crate::error::{ForecastError, Result};
use crate::sources::{HistoryRequest, HistorySource};
use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use tracing::{debug, info};

/// Longest accepted ticker symbol
const MAX_TICKER_LEN: usize = 15;

/// Trim and upper-case a ticker, rejecting anything that cannot be a symbol.
///
/// Accepted characters are ASCII letters, digits and `.^=-`, which covers
/// share classes (`BRK.B`), indices (`^GSPC`), futures (`ES=F`) and
/// crypto pairs (`BTC-USD`).
pub fn normalize_ticker(ticker: &str) -> Result<String> {
    let symbol = ticker.trim().to_ascii_uppercase();

    let valid = !symbol.is_empty()
        && symbol.len() <= MAX_TICKER_LEN
        && symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '^' | '=' | '-'));

    if !valid {
        return Err(ForecastError::InvalidTicker(ticker.to_string()));
    }

    Ok(symbol)
}

/// Fetches daily history from a [`HistorySource`] and memoizes it per
/// (ticker, start date) for the lifetime of the loader.
#[derive(Debug)]
pub struct HistoryLoader<S: HistorySource> {
    source: S,
    cache: Option<HashMap<(String, NaiveDate), PriceSeries>>,
    end_date: Option<NaiveDate>,
}

impl<S: HistorySource> HistoryLoader<S> {
    /// Loader with memoization enabled
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: Some(HashMap::new()),
            end_date: None,
        }
    }

    /// Loader that always goes to the source
    pub fn without_cache(source: S) -> Self {
        Self {
            source,
            cache: None,
            end_date: None,
        }
    }

    /// Pin the last requested date instead of using today's date (UTC)
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// The underlying source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Number of memoized series
    pub fn cached_entries(&self) -> usize {
        self.cache.as_ref().map_or(0, HashMap::len)
    }

    /// Load daily history for `ticker` from `start_date` through the end date.
    ///
    /// No data is an empty series, not an error. An invalid ticker or a
    /// failing source is an error; failed loads are never cached.
    pub fn load(&mut self, ticker: &str, start_date: NaiveDate) -> Result<PriceSeries> {
        let symbol = normalize_ticker(ticker)?;
        let key = (symbol.clone(), start_date);

        if let Some(series) = self.cache.as_ref().and_then(|c| c.get(&key)) {
            debug!(ticker = %symbol, start = %start_date, "history cache hit");
            return Ok(series.clone());
        }

        let end_date = self.end_date.unwrap_or_else(|| Utc::now().date_naive());
        let series = if start_date > end_date {
            debug!(ticker = %symbol, start = %start_date, "start date is in the future");
            PriceSeries::empty(symbol.clone())
        } else {
            let request = HistoryRequest {
                ticker: symbol.clone(),
                start_date,
                end_date,
            };
            let bars = self.source.fetch(&request)?;
            let raw_rows = bars.len();
            let series = PriceSeries::from_bars(symbol.clone(), bars, start_date);

            info!(
                source = self.source.name(),
                ticker = %symbol,
                raw_rows,
                rows = series.len(),
                "loaded daily history"
            );
            series
        };

        if let Some(cache) = self.cache.as_mut() {
            cache.insert(key, series.clone());
        }

        Ok(series)
    }
}
