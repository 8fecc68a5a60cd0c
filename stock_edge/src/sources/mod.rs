//! Providers of daily price bars

use crate::data::PriceBar;
use crate::error::Result;
use chrono::NaiveDate;

pub mod csv_file;
pub mod synthetic;
pub mod yahoo;

pub use csv_file::CsvSource;
pub use synthetic::SyntheticSource;
pub use yahoo::YahooSource;

/// A read-only daily price lookup
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HistoryRequest {
    /// Normalized ticker symbol
    pub ticker: String,
    /// First date requested, inclusive
    pub start_date: NaiveDate,
    /// Last date requested, inclusive
    pub end_date: NaiveDate,
}

/// Something that can return daily bars for a ticker.
///
/// An unknown ticker or a range without trading days is an empty `Vec`,
/// not an error. Errors are reserved for provider failures.
pub trait HistorySource {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Fetch daily bars for the request. Bars need not be sorted or filtered.
    fn fetch(&self, request: &HistoryRequest) -> Result<Vec<PriceBar>>;
}

impl<S: HistorySource + ?Sized> HistorySource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(&self, request: &HistoryRequest) -> Result<Vec<PriceBar>> {
        (**self).fetch(request)
    }
}
