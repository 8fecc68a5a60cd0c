//! Overbought / oversold classification of momentum values

use serde::{Deserialize, Serialize};
use std::fmt;

/// Momentum strictly above this is overbought
pub const OVERBOUGHT_THRESHOLD: f64 = 80.0;
/// Momentum strictly below this is oversold
pub const OVERSOLD_THRESHOLD: f64 = 20.0;

/// Trading signal state of one forecast step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalStatus {
    /// Momentum above the upper threshold
    Overbought,
    /// Momentum below the lower threshold
    Oversold,
    /// Between the thresholds, bounds included
    Neutral,
}

impl SignalStatus {
    /// Display label
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalStatus::Overbought => "Overbought",
            SignalStatus::Oversold => "Oversold",
            SignalStatus::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for SignalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify one momentum value.
///
/// Total over `f64`: NaN compares false against both thresholds and
/// therefore lands on `Neutral`.
pub fn classify(momentum: f64) -> SignalStatus {
    if momentum > OVERBOUGHT_THRESHOLD {
        SignalStatus::Overbought
    } else if momentum < OVERSOLD_THRESHOLD {
        SignalStatus::Oversold
    } else {
        SignalStatus::Neutral
    }
}

/// Stateless classifier over a momentum series
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalClassifier;

impl SignalClassifier {
    /// Classify every value, preserving order
    pub fn classify_all(&self, momentum: &[f64]) -> Vec<SignalStatus> {
        momentum.iter().copied().map(classify).collect()
    }
}
