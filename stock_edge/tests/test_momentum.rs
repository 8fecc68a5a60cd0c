use approx::assert_relative_eq;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use stock_edge::engine::ForecastPoint;
use stock_edge::momentum::{momentum_from_values, MomentumTransform, DEGENERATE_MOMENTUM};
use stock_edge::signals::{SignalClassifier, SignalStatus};
use stock_edge::utils::business_days_after;

fn points(values: &[f64]) -> Vec<ForecastPoint> {
    let last = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    business_days_after(last, values.len())
        .into_iter()
        .zip(values)
        .enumerate()
        .map(|(i, (date, &predicted_close))| ForecastPoint {
            index: 100 + i,
            date,
            predicted_close,
        })
        .collect()
}

#[test]
fn test_momentum_known_path() {
    let forecast = points(&[10.0, 12.0, 11.0, 15.0, 15.0, 14.0, 20.0]);
    let momentum = MomentumTransform.apply(&forecast).unwrap();

    assert_eq!(momentum.differences, vec![0.0, 2.0, -1.0, 4.0, 0.0, -1.0, 6.0]);
    assert!(!momentum.degenerate);

    let expected = [
        100.0 / 7.0,
        300.0 / 7.0,
        0.0,
        500.0 / 7.0,
        100.0 / 7.0,
        0.0,
        100.0,
    ];
    for (actual, expected) in momentum.values.iter().zip(expected) {
        assert_relative_eq!(*actual, expected, epsilon = 1e-9);
    }

    let statuses = SignalClassifier.classify_all(&momentum.values);
    assert_eq!(
        statuses,
        vec![
            SignalStatus::Oversold,
            SignalStatus::Neutral,
            SignalStatus::Oversold,
            SignalStatus::Neutral,
            SignalStatus::Oversold,
            SignalStatus::Oversold,
            SignalStatus::Overbought,
        ]
    );
}

#[test]
fn test_momentum_bounds_hit() {
    let momentum = momentum_from_values(&[101.0, 101.5, 100.2, 103.0, 102.7, 102.9, 104.1]).unwrap();

    assert_eq!(momentum.len(), 7);
    assert!(momentum.values.iter().all(|v| (0.0..=100.0).contains(v)));
    assert!(momentum.values.contains(&0.0));
    assert!(momentum.values.contains(&100.0));
}

#[test]
fn test_momentum_small_steps_stay_in_range() {
    for step in [0.007, 0.081] {
        let momentum = momentum_from_values(&[0.0, step, step, step, step, step, step]).unwrap();

        assert_eq!(momentum.values[1], 100.0);
        assert!(momentum.values.iter().all(|v| (0.0..=100.0).contains(v)));
    }
}

#[test]
fn test_momentum_flat_path_is_degenerate() {
    // Equal steps after the zero head only happen for a flat path
    let momentum = momentum_from_values(&[100.0; 7]).unwrap();

    assert!(momentum.degenerate);
    assert_eq!(momentum.values, vec![DEGENERATE_MOMENTUM; 7]);
    assert_eq!(
        SignalClassifier.classify_all(&momentum.values),
        vec![SignalStatus::Neutral; 7]
    );
}

#[test]
fn test_momentum_ignores_last_observed_close() {
    // Only the forecast path matters; shifting it leaves momentum unchanged
    let base = momentum_from_values(&[10.0, 12.0, 11.0, 15.0]).unwrap();
    let shifted = momentum_from_values(&[110.0, 112.0, 111.0, 115.0]).unwrap();

    for (a, b) in base.values.iter().zip(&shifted.values) {
        assert_relative_eq!(*a, *b, epsilon = 1e-9);
    }
}

#[test]
fn test_momentum_empty_input() {
    assert!(MomentumTransform.apply(&[]).is_err());
}
