//! Yahoo Finance chart API
//!
//! Fetches daily bars from `/v8/finance/chart/{ticker}` with a blocking
//! client. A "Not Found" API error means the symbol has no data and maps to
//! an empty result; every other failure is a source error.

use crate::data::PriceBar;
use crate::error::{ForecastError, Result};
use crate::sources::{HistoryRequest, HistorySource};
use chrono::{DateTime, Days, NaiveDate};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

/// Public chart endpoint
pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Error code the API uses for unknown or delisted symbols
const NOT_FOUND_CODE: &str = "Not Found";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: Option<ChartMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    gmtoffset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteData {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

/// Yahoo Finance client
#[derive(Debug, Clone)]
pub struct YahooSource {
    base_url: String,
    client: Client,
}

impl YahooSource {
    /// Client against `base_url` with a per-request `timeout`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Client against the public endpoint
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        Self::new(DEFAULT_BASE_URL, timeout)
    }

    /// Parse a chart API response body into bars
    pub fn parse_chart(body: &str) -> Result<Vec<PriceBar>> {
        let response: ChartResponse = serde_json::from_str(body).map_err(|e| {
            ForecastError::SourceError(format!("Malformed chart response: {}", e))
        })?;

        if let Some(error) = response.chart.error {
            if error.code == NOT_FOUND_CODE {
                debug!(description = ?error.description, "symbol not found");
                return Ok(Vec::new());
            }
            return Err(ForecastError::SourceError(format!(
                "API error [{}]: {}",
                error.code,
                error.description.unwrap_or_default()
            )));
        }

        let data = match response.chart.result.as_deref().and_then(|r| r.first()) {
            Some(data) => data,
            None => return Ok(Vec::new()),
        };

        let timestamps = match &data.timestamp {
            Some(ts) => ts,
            None => return Ok(Vec::new()),
        };

        let empty = QuoteData::default();
        let quote = data.indicators.quote.first().unwrap_or(&empty);
        let offset = data.meta.as_ref().and_then(|m| m.gmtoffset).unwrap_or(0);

        let mut bars = Vec::with_capacity(timestamps.len());
        for (i, &timestamp) in timestamps.iter().enumerate() {
            let close = match quote.close.get(i).copied().flatten() {
                Some(close) => close,
                None => continue,
            };
            let date = match exchange_date(timestamp, offset) {
                Some(date) => date,
                None => continue,
            };

            let field = |column: &[Option<f64>]| column.get(i).copied().flatten().unwrap_or(close);
            bars.push(PriceBar {
                date,
                open: field(quote.open.as_slice()),
                high: field(quote.high.as_slice()),
                low: field(quote.low.as_slice()),
                close,
                volume: quote.volume.get(i).copied().flatten().unwrap_or(0),
            });
        }

        Ok(bars)
    }

    fn url(&self, ticker: &str) -> String {
        format!("{}/{}", self.base_url, ticker)
    }
}

/// Trading date of a bar stamped at `timestamp` on an exchange `offset`
/// seconds from UTC
fn exchange_date(timestamp: i64, offset: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp + offset, 0).map(|dt| dt.date_naive())
}

/// Seconds since the epoch at midnight UTC
fn unix_midnight(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

impl HistorySource for YahooSource {
    fn name(&self) -> &str {
        "yahoo"
    }

    fn fetch(&self, request: &HistoryRequest) -> Result<Vec<PriceBar>> {
        let period1 = unix_midnight(request.start_date);
        let period2 = request
            .end_date
            .checked_add_days(Days::new(1))
            .map(unix_midnight)
            .unwrap_or(period1);

        info!(
            ticker = %request.ticker,
            start = %request.start_date,
            end = %request.end_date,
            "requesting daily history"
        );

        let response = self
            .client
            .get(self.url(&request.ticker))
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
                ("events", "history".to_string()),
            ])
            .send()?;

        let status = response.status();
        let body = response.text()?;

        // The API reports unknown symbols as 404 with a JSON error body
        match Self::parse_chart(&body) {
            Ok(bars) => Ok(bars),
            Err(_) if !status.is_success() => Err(ForecastError::SourceError(format!(
                "HTTP {} from {}",
                status,
                self.name()
            ))),
            Err(e) => Err(e),
        }
    }
}
