//! Daily bars from local CSV files, one file per ticker

use crate::data::PriceBar;
use crate::error::{ForecastError, Result};
use crate::sources::{HistoryRequest, HistorySource};
use crate::utils::date_parser;
use csv::StringRecord;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads `<dir>/<TICKER>.csv`.
///
/// The header must contain `date` and `close` (case-insensitive); `open`,
/// `high`, `low` and `volume` are optional. A missing file means the ticker
/// has no data.
#[derive(Debug, Clone)]
pub struct CsvSource {
    dir: PathBuf,
}

/// Column positions found in the header
struct Columns {
    date: usize,
    close: usize,
    open: Option<usize>,
    high: Option<usize>,
    low: Option<usize>,
    volume: Option<usize>,
}

impl Columns {
    fn detect(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };

        let date = find("date").ok_or_else(|| {
            ForecastError::DataError("No date column found in data".to_string())
        })?;
        let close = find("close").ok_or_else(|| {
            ForecastError::DataError("No close column found in data".to_string())
        })?;

        Ok(Self {
            date,
            close,
            open: find("open"),
            high: find("high"),
            low: find("low"),
            volume: find("volume"),
        })
    }
}

impl CsvSource {
    /// Source reading from `dir`
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path the data for `ticker` is read from
    pub fn path_for(&self, ticker: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", ticker))
    }

    /// Read every bar in a CSV file
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<PriceBar>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)?;

        let columns = Columns::detect(reader.headers()?)?;

        let mut bars = Vec::new();
        for record in reader.records() {
            let record = record?;
            let date = date_parser::parse_date(field(&record, columns.date)?)?;

            // Rows without a close are skipped, the same as provider gaps
            let close = match optional_number(&record, Some(columns.close))? {
                Some(close) => close,
                None => continue,
            };

            bars.push(PriceBar {
                date,
                open: optional_number(&record, columns.open)?.unwrap_or(close),
                high: optional_number(&record, columns.high)?.unwrap_or(close),
                low: optional_number(&record, columns.low)?.unwrap_or(close),
                close,
                volume: optional_number(&record, columns.volume)?
                    .map(|v| v.max(0.0) as u64)
                    .unwrap_or(0),
            });
        }

        Ok(bars)
    }
}

fn field(record: &StringRecord, index: usize) -> Result<&str> {
    record.get(index).ok_or_else(|| {
        ForecastError::DataError(format!("Row is missing column {}", index + 1))
    })
}

fn optional_number(record: &StringRecord, index: Option<usize>) -> Result<Option<f64>> {
    let raw = match index.and_then(|i| record.get(i)) {
        Some(raw) if !raw.is_empty() && !raw.eq_ignore_ascii_case("null") => raw,
        _ => return Ok(None),
    };

    raw.parse::<f64>()
        .map(Some)
        .map_err(|e| ForecastError::DataError(format!("Invalid number '{}': {}", raw, e)))
}

impl HistorySource for CsvSource {
    fn name(&self) -> &str {
        "csv"
    }

    fn fetch(&self, request: &HistoryRequest) -> Result<Vec<PriceBar>> {
        let path = self.path_for(&request.ticker);
        if !path.exists() {
            debug!(path = %path.display(), "no history file for ticker");
            return Ok(Vec::new());
        }

        let bars = Self::read_file(&path)
            .map_err(|e| ForecastError::SourceError(format!("{}: {}", path.display(), e)))?;

        Ok(bars
            .into_iter()
            .filter(|b| b.date <= request.end_date)
            .collect())
    }
}
