use approx::assert_relative_eq;
use chrono::{Days, NaiveDate};
use stock_edge::data::PriceSeries;
use stock_edge::engine::{ForecastEngine, FORECAST_HORIZON};
use stock_edge::error::{ErrorKind, ForecastError};
use stock_edge::models::arima::Arima;
use stock_edge::models::{ForecastModel, TrainedForecastModel};
use stock_edge::utils::{business_days_after, next_business_day};

fn business_dates(start: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(count);
    let mut date = start;
    for _ in 0..count {
        dates.push(date);
        date = next_business_day(date);
    }
    dates
}

fn create_test_data(closes: Vec<f64>) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    PriceSeries::new("TEST", business_dates(start, closes.len()), closes).unwrap()
}

/// Trending series with some wobble so the AR fit is well conditioned
fn wavy_closes(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            100.0 + 0.3 * t + 2.0 * (t * 0.7).sin() + 0.5 * (t * 1.9).cos()
        })
        .collect()
}

#[test]
fn test_arima_default_order() {
    let model = Arima::default();
    assert_eq!(model.order(), (5, 1, 0));
    assert_eq!(model.min_observations(), 6);
    assert_eq!(ForecastModel::name(&model), "ARIMA(5,1,0)");
}

#[test]
fn test_arima_forecast_length() {
    let data = create_test_data(wavy_closes(60));
    let trained = Arima::default().train(&data).unwrap();

    let forecast = trained.forecast(FORECAST_HORIZON).unwrap();
    assert_eq!(forecast.horizons(), 7);
    assert_eq!(forecast.values().len(), 7);
    assert!(forecast.values().iter().all(|v| v.is_finite()));
    assert_eq!(trained.ar_coefficients().len(), 5);
}

#[test]
fn test_arima_minimum_observations() {
    let model = Arima::default();

    let too_short = create_test_data(vec![10.0, 11.0, 10.5, 12.0, 11.0]);
    let err = model.train(&too_short).unwrap_err();
    assert!(matches!(err, ForecastError::FitError(_)));
    assert_eq!(err.kind(), ErrorKind::Fit);

    let just_enough = create_test_data(vec![10.0, 11.0, 10.5, 12.0, 11.0, 12.5]);
    let forecast = model.train(&just_enough).unwrap().forecast(7).unwrap();
    assert_eq!(forecast.values().len(), 7);
    assert!(forecast.values().iter().all(|v| v.is_finite()));
}

#[test]
fn test_arima_constant_series_fails() {
    let data = create_test_data(vec![50.0; 30]);
    let err = Arima::default().train(&data).unwrap_err();
    assert!(matches!(err, ForecastError::FitError(_)));
}

#[test]
fn test_arima_rejects_non_finite() {
    let mut closes = wavy_closes(20);
    closes[10] = f64::NAN;
    let err = Arima::default().fit(&closes).unwrap_err();
    assert!(matches!(err, ForecastError::FitError(_)));
}

#[test]
fn test_arima_is_deterministic() {
    let data = create_test_data(wavy_closes(120));
    let model = Arima::default();

    let first = model.train(&data).unwrap().forecast(7).unwrap();
    let second = model.train(&data).unwrap().forecast(7).unwrap();

    assert_eq!(first.values(), second.values());
}

#[test]
fn test_arima_ar1_on_levels() {
    // x_t = 0.5 x_{t-1} around zero mean; one-step-ahead forecasts decay
    let mut values = vec![1.0];
    for i in 1..200 {
        let shock = if i % 2 == 0 { 0.3 } else { -0.3 };
        values.push(0.5 * values[i - 1] + shock);
    }

    let trained = Arima::new(1, 0, 0).unwrap().fit(&values).unwrap();
    let phi = trained.ar_coefficients()[0];
    assert!(phi.abs() < 1.0);

    let forecast = trained.forecast(3).unwrap();
    assert_eq!(forecast.values().len(), 3);
    assert!(trained.sigma2() > 0.0);
    assert!(trained.residual_variance().is_some());
}

#[test]
fn test_engine_labels_business_days() {
    // Last observation is a Friday
    let closes = wavy_closes(40);
    let data = create_test_data(closes);
    let last = data.last_date().unwrap();

    let engine = ForecastEngine::new();
    let points = engine.forecast(&data).unwrap();

    assert_eq!(points.len(), 7);
    assert_eq!(
        points.iter().map(|p| p.date).collect::<Vec<_>>(),
        business_days_after(last, 7)
    );
    assert_eq!(points[0].index, 40);
    assert_eq!(points[6].index, 46);
    assert!(points[0].date > last);
    assert!(points[0].date <= last.checked_add_days(Days::new(3)).unwrap());
}

#[test]
fn test_engine_empty_series_fails() {
    let engine = ForecastEngine::new();
    let err = engine.forecast(&PriceSeries::empty("TEST")).unwrap_err();
    assert!(matches!(err, ForecastError::FitError(_)));
}

#[test]
fn test_random_walk_forecast_is_flat() {
    let trained = Arima::new(0, 1, 0)
        .unwrap()
        .fit(&[10.0, 11.0, 10.0, 12.0])
        .unwrap();
    for value in trained.forecast(4).unwrap().values() {
        assert_relative_eq!(*value, 12.0, epsilon = 1e-12);
    }
}
