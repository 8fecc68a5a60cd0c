//! # Trade Math
//!
//! Mathematical building blocks shared by the forecasting crates.
//! This crate provides the numeric pieces of an autoregressive fit
//! (differencing, autocovariance, Levinson-Durbin) and the transforms used
//! to turn a price path into a bounded oscillator.

use thiserror::Error;

pub mod autoregression;
pub mod series;

pub use autoregression::{autocovariance, levinson_durbin, YuleWalkerSolution};
pub use series::{difference, first_difference_from_zero, min_max_scale, ScaledSeries};

/// Errors that can occur in trading-related calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for trading math operations
pub type Result<T> = std::result::Result<T, MathError>;
