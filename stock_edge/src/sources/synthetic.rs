//! Deterministic random-walk history for offline runs

use crate::data::PriceBar;
use crate::error::{ForecastError, Result};
use crate::sources::{HistoryRequest, HistorySource};
use crate::utils::{is_business_day, next_business_day};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;

/// Geometric random walk over business days.
///
/// The same seed, ticker and date range always produce the same bars.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    seed: u64,
    initial_price: f64,
    daily_drift: f64,
    daily_volatility: f64,
}

impl SyntheticSource {
    /// Create a source with the given seed, starting price and daily log
    /// return parameters
    pub fn new(seed: u64, initial_price: f64, daily_drift: f64, daily_volatility: f64) -> Result<Self> {
        if !(initial_price > 0.0) || !initial_price.is_finite() {
            return Err(ForecastError::InvalidParameter(format!(
                "Initial price must be positive, got {}",
                initial_price
            )));
        }
        if !(daily_volatility >= 0.0) || !daily_volatility.is_finite() {
            return Err(ForecastError::InvalidParameter(format!(
                "Volatility must be non-negative, got {}",
                daily_volatility
            )));
        }

        Ok(Self {
            seed,
            initial_price,
            daily_drift,
            daily_volatility,
        })
    }

    /// Seeded source with equity-like defaults
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            initial_price: 150.0,
            daily_drift: 0.0003,
            daily_volatility: 0.015,
        }
    }

    /// Mix the ticker into the seed so different tickers walk differently
    fn seed_for(&self, ticker: &str) -> u64 {
        ticker.bytes().fold(self.seed, |acc, b| {
            acc.wrapping_mul(0x100_0000_01b3).wrapping_add(u64::from(b))
        })
    }
}

impl HistorySource for SyntheticSource {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(&self, request: &HistoryRequest) -> Result<Vec<PriceBar>> {
        let returns = Normal::new(self.daily_drift, self.daily_volatility)
            .map_err(|e| ForecastError::InvalidParameter(e.to_string()))?;
        let mut rng = StdRng::seed_from_u64(self.seed_for(&request.ticker));

        let mut date = request.start_date;
        if !is_business_day(date) {
            date = next_business_day(date);
        }

        let mut bars = Vec::new();
        let mut close = self.initial_price;
        while date <= request.end_date {
            let open = close;
            close = open * rng.sample(returns).exp();
            let wick = rng.gen_range(0.0..self.daily_volatility.max(1e-6));

            bars.push(PriceBar {
                date,
                open,
                high: open.max(close) * (1.0 + wick),
                low: open.min(close) * (1.0 - wick),
                close,
                volume: rng.gen_range(1_000_000..5_000_000),
            });

            date = next_business_day(date);
        }

        Ok(bars)
    }
}
