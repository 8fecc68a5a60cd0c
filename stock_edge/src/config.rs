//! Runtime configuration read from the environment

use crate::error::{ForecastError, Result};
use crate::sources::{yahoo, CsvSource, HistorySource, SyntheticSource, YahooSource};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Which provider supplies price history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Yahoo Finance chart API
    Yahoo,
    /// `<TICKER>.csv` files in a directory
    Csv,
    /// Seeded random walk
    Synthetic,
}

impl FromStr for SourceKind {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yahoo" => Ok(SourceKind::Yahoo),
            "csv" => Ok(SourceKind::Csv),
            "synthetic" => Ok(SourceKind::Synthetic),
            other => Err(ForecastError::InvalidParameter(format!(
                "Unknown data source '{}', expected yahoo, csv or synthetic",
                other
            ))),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::Yahoo => "yahoo",
            SourceKind::Csv => "csv",
            SourceKind::Synthetic => "synthetic",
        };
        f.write_str(name)
    }
}

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Price history provider
    pub source: SourceKind,
    /// Directory read by the CSV source
    pub data_dir: PathBuf,
    /// Chart API base URL for the Yahoo source
    pub yahoo_base_url: String,
    /// Timeout applied to each history request
    pub request_timeout: Duration,
    /// Memoize loaded history per (ticker, start date)
    pub cache_enabled: bool,
    /// Seed for the synthetic source
    pub synthetic_seed: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Yahoo,
            data_dir: PathBuf::from("data"),
            yahoo_base_url: yahoo::DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            cache_enabled: true,
            synthetic_seed: 42,
        }
    }
}

impl PipelineConfig {
    /// Read `STOCK_EDGE_*` variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let source = match lookup("STOCK_EDGE_SOURCE") {
            Some(value) => value.parse()?,
            None => defaults.source,
        };

        let data_dir = lookup("STOCK_EDGE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let yahoo_base_url = lookup("STOCK_EDGE_YAHOO_URL").unwrap_or(defaults.yahoo_base_url);

        let request_timeout = match lookup("STOCK_EDGE_TIMEOUT_SECS") {
            Some(value) => {
                let secs: u64 = value.trim().parse().map_err(|_| {
                    ForecastError::InvalidParameter(format!(
                        "STOCK_EDGE_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                        value
                    ))
                })?;
                if secs == 0 {
                    return Err(ForecastError::InvalidParameter(
                        "STOCK_EDGE_TIMEOUT_SECS must be greater than zero".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => defaults.request_timeout,
        };

        let cache_enabled = match lookup("STOCK_EDGE_CACHE") {
            Some(value) => parse_bool("STOCK_EDGE_CACHE", &value)?,
            None => defaults.cache_enabled,
        };

        let synthetic_seed = match lookup("STOCK_EDGE_SEED") {
            Some(value) => value.trim().parse().map_err(|_| {
                ForecastError::InvalidParameter(format!(
                    "STOCK_EDGE_SEED must be an unsigned integer, got '{}'",
                    value
                ))
            })?,
            None => defaults.synthetic_seed,
        };

        Ok(Self {
            source,
            data_dir,
            yahoo_base_url,
            request_timeout,
            cache_enabled,
            synthetic_seed,
        })
    }

    /// Construct the configured history source
    pub fn build_source(&self) -> Result<Box<dyn HistorySource>> {
        let source: Box<dyn HistorySource> = match self.source {
            SourceKind::Yahoo => Box::new(YahooSource::new(
                self.yahoo_base_url.clone(),
                self.request_timeout,
            )?),
            SourceKind::Csv => Box::new(CsvSource::new(&self.data_dir)),
            SourceKind::Synthetic => Box::new(SyntheticSource::with_seed(self.synthetic_seed)),
        };
        Ok(source)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ForecastError::InvalidParameter(format!(
            "{} must be true or false, got '{}'",
            key, value
        ))),
    }
}
