//! Error types for the stock_edge crate

use polars::prelude::PolarsError;
use thiserror::Error;
use trade_math::MathError;

/// Custom error types for the stock_edge crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// The price history provider failed or returned something unusable
    #[error("Data source error: {0}")]
    SourceError(String),

    /// Ticker symbol rejected before any request was made
    #[error("Invalid ticker symbol: '{0}'")]
    InvalidTicker(String),

    /// Model estimation failed or the series cannot support the model order
    #[error("Model fit error: {0}")]
    FitError(String),

    /// Error related to parameter validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from mathematical operations
    #[error("Math error: {0}")]
    MathError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error while reading or writing CSV
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),
}

/// Coarse grouping of failures, used when reporting to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Data provider or ticker problem
    Source,
    /// Model could not be fitted
    Fit,
    /// Anything else: malformed data, bad parameters, IO
    Data,
}

impl ForecastError {
    /// Classify this error for presentation
    pub fn kind(&self) -> ErrorKind {
        match self {
            ForecastError::SourceError(_) | ForecastError::InvalidTicker(_) => ErrorKind::Source,
            ForecastError::FitError(_) => ErrorKind::Fit,
            _ => ErrorKind::Data,
        }
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::CsvError(err.to_string())
    }
}

impl From<reqwest::Error> for ForecastError {
    fn from(err: reqwest::Error) -> Self {
        ForecastError::SourceError(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::DataError(err.to_string())
    }
}

impl From<MathError> for ForecastError {
    fn from(err: MathError) -> Self {
        ForecastError::MathError(err.to_string())
    }
}
