use chrono::{Datelike, NaiveDate, Weekday};
use rstest::rstest;
use stock_edge::loader::normalize_ticker;
use stock_edge::utils::{business_days_after, date_parser, is_business_day};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_business_days_after_friday() {
    let days = business_days_after(date(2024, 1, 5), 7);

    assert_eq!(
        days,
        vec![
            date(2024, 1, 8),
            date(2024, 1, 9),
            date(2024, 1, 10),
            date(2024, 1, 11),
            date(2024, 1, 12),
            date(2024, 1, 15),
            date(2024, 1, 16),
        ]
    );
}

#[test]
fn test_business_days_after_weekend_start() {
    // A Sunday close still rolls to Monday
    let days = business_days_after(date(2024, 1, 7), 3);
    assert_eq!(days[0], date(2024, 1, 8));
    assert!(days.iter().all(|d| is_business_day(*d)));
    assert!(days.iter().all(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun)));
}

#[test]
fn test_date_parser() {
    assert_eq!(date_parser::parse_date("2023-01-03").unwrap(), date(2023, 1, 3));
    assert_eq!(
        date_parser::parse_date("2023-01-03 00:00:00-05:00").unwrap(),
        date(2023, 1, 3)
    );
    assert_eq!(date_parser::parse_date("01/03/2023").unwrap(), date(2023, 1, 3));
    assert!(date_parser::parse_date("not a date").is_err());
}

#[rstest]
#[case("aapl", "AAPL")]
#[case("  msft ", "MSFT")]
#[case("brk.b", "BRK.B")]
#[case("^gspc", "^GSPC")]
#[case("es=f", "ES=F")]
#[case("btc-usd", "BTC-USD")]
fn test_normalize_ticker(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(normalize_ticker(input).unwrap(), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("AA PL")]
#[case("DROP;TABLE")]
#[case("AVERYLONGTICKERSYMBOL")]
fn test_normalize_ticker_rejects(#[case] input: &str) {
    assert!(normalize_ticker(input).is_err());
}
