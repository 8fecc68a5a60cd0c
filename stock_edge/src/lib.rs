//! # Stock Edge
//!
//! Short-horizon price forecasting for a single ticker.
//!
//! ## Features
//!
//! - Daily close history from Yahoo Finance, local CSV files or a seeded random walk
//! - ARIMA(5,1,0) fitted by Yule-Walker, forecasting the next 7 business days
//! - A 0-100 momentum oscillator over the forecast path
//! - Overbought / Oversold / Neutral signals per forecast day
//! - Result tables as polars DataFrames, JSON or CSV
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use stock_edge::{run_pipeline, PipelineOutcome};
//!
//! let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
//! match run_pipeline("AAPL", start) {
//!     PipelineOutcome::Success(report) => {
//!         for row in report.table.rows() {
//!             println!("{} {:.2} {:.1} {}", row.date, row.predicted_close, row.momentum, row.status);
//!         }
//!     }
//!     PipelineOutcome::NoData { .. } => println!("No data available"),
//!     PipelineOutcome::Failure(e) => eprintln!("An error occurred: {}", e),
//! }
//! ```

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod loader;
pub mod models;
pub mod momentum;
pub mod pipeline;
pub mod signals;
pub mod sources;
pub mod table;
pub mod utils;

// Re-export commonly used types
pub use crate::config::{PipelineConfig, SourceKind};
pub use crate::data::{PriceBar, PriceSeries};
pub use crate::engine::{ForecastEngine, ForecastPoint, FORECAST_HORIZON};
pub use crate::error::{ErrorKind, ForecastError, Result};
pub use crate::loader::{normalize_ticker, HistoryLoader};
pub use crate::models::arima::Arima;
pub use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
pub use crate::momentum::{MomentumSeries, MomentumTransform};
pub use crate::pipeline::{run_pipeline, run_pipeline_with_config, ForecastReport, Pipeline, PipelineOutcome};
pub use crate::signals::{classify, SignalClassifier, SignalStatus};
pub use crate::sources::{HistoryRequest, HistorySource};
pub use crate::table::{ForecastTable, ResultAssembler, ResultRow};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
