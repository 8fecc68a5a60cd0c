//! Utility functions for the stock_edge crate

use crate::error::{ForecastError, Result};
use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Days from 0001-01-01 (proleptic Gregorian) to 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Whether `date` falls on Monday through Friday
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// First business day strictly after `date`
pub fn next_business_day(date: NaiveDate) -> NaiveDate {
    let mut next = date;
    loop {
        next = match next.checked_add_days(Days::new(1)) {
            Some(d) => d,
            None => return next,
        };
        if is_business_day(next) {
            return next;
        }
    }
}

/// The `count` business days following `date`, ascending.
///
/// No holiday calendar is applied; only weekends are skipped.
pub fn business_days_after(date: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(count);
    let mut current = date;
    for _ in 0..count {
        current = next_business_day(current);
        dates.push(current);
    }
    dates
}

/// Days since 1970-01-01, the physical representation of a polars `Date`
pub fn days_since_unix_epoch(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

/// Date parsing helpers
pub mod date_parser {
    use super::*;

    /// Parse a calendar date.
    ///
    /// Accepts `YYYY-MM-DD` and anything that starts with it, such as the
    /// `2022-01-03 00:00:00-05:00` stamps written by common market data exports.
    pub fn parse_date(value: &str) -> Result<NaiveDate> {
        let trimmed = value.trim();
        let head = trimmed.get(..10).unwrap_or(trimmed);

        NaiveDate::parse_from_str(head, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(trimmed, "%m/%d/%Y"))
            .map_err(|e| ForecastError::DataError(format!("Invalid date '{}': {}", value, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn next_business_day_skips_weekend() {
        // Friday -> Monday
        assert_eq!(next_business_day(date(2024, 1, 5)), date(2024, 1, 8));
        // Saturday -> Monday
        assert_eq!(next_business_day(date(2024, 1, 6)), date(2024, 1, 8));
        // Tuesday -> Wednesday
        assert_eq!(next_business_day(date(2024, 1, 9)), date(2024, 1, 10));
    }

    #[test]
    fn epoch_offset() {
        assert_eq!(days_since_unix_epoch(date(1970, 1, 1)), 0);
        assert_eq!(days_since_unix_epoch(date(1970, 1, 2)), 1);
        assert_eq!(days_since_unix_epoch(date(1969, 12, 31)), -1);
    }

    #[test]
    fn parse_date_accepts_timestamp_suffix() {
        assert_eq!(
            date_parser::parse_date("2022-01-03 00:00:00-05:00").unwrap(),
            date(2022, 1, 3)
        );
        assert_eq!(date_parser::parse_date("01/03/2022").unwrap(), date(2022, 1, 3));
        assert!(date_parser::parse_date("yesterday").is_err());
    }
}
