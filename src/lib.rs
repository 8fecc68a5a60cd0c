//! # Stock Edge workspace
//!
//! Umbrella crate re-exporting the workspace members.
//!
//! ```no_run
//! use stock_edge_workspace::stock_edge::{run_pipeline, PipelineOutcome};
//!
//! let start = chrono::NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
//! if let PipelineOutcome::Success(report) = run_pipeline("AAPL", start) {
//!     println!("{} forecast rows", report.table.len());
//! }
//! ```

pub use stock_edge;
pub use trade_math;
