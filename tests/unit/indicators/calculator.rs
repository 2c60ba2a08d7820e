//! Unit tests for the indicator calculator

use stockfinder::indicators::trend::{calculate_ema, calculate_sma};
use stockfinder::indicators::{augment, augment_in_place, compute_column};
use stockfinder::models::IndicatorKind;

use crate::test_utils::series_from_closes;

fn wavy_closes(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| 250.0 + (i as f64 * 0.37).sin() * 12.0 + i as f64 * 0.05)
        .collect()
}

#[test]
fn test_augment_adds_aligned_columns() {
    let series = augment(series_from_closes(&wavy_closes(64)));

    for &kind in IndicatorKind::all() {
        let column = series.column(kind).expect("column present");
        assert_eq!(column.len(), series.len(), "{} misaligned", kind);
    }
}

#[test]
fn test_compute_column_dispatch() {
    let closes = wavy_closes(220);

    assert_eq!(compute_column(IndicatorKind::ShortEma, &closes), calculate_ema(&closes, 20));
    assert_eq!(compute_column(IndicatorKind::MediumSma, &closes), calculate_sma(&closes, 30));
    assert_eq!(compute_column(IndicatorKind::LongEma, &closes), calculate_ema(&closes, 200));
}

#[test]
fn test_augment_is_idempotent() {
    let once = augment(series_from_closes(&wavy_closes(240)));
    let mut twice = once.clone();
    augment_in_place(&mut twice);

    for &kind in IndicatorKind::all() {
        let a: Vec<Option<u64>> = once.column(kind).unwrap().iter().map(|v| v.map(f64::to_bits)).collect();
        let b: Vec<Option<u64>> = twice.column(kind).unwrap().iter().map(|v| v.map(f64::to_bits)).collect();
        assert_eq!(a, b, "{} changed on recompute", kind);
    }
}

#[test]
fn test_constant_close_columns() {
    let series = augment(series_from_closes(&vec![75.0; 400]));

    for i in 29..series.len() {
        assert_eq!(series.value(IndicatorKind::MediumSma, i), Some(75.0));
    }
    let last = series.len() - 1;
    assert!((series.value(IndicatorKind::ShortEma, last).unwrap() - 75.0).abs() < 1e-9);
    assert!((series.value(IndicatorKind::LongEma, last).unwrap() - 75.0).abs() < 1e-9);
}

#[test]
fn test_augment_empty_series() {
    let series = augment(series_from_closes(&[]));
    assert_eq!(series.column(IndicatorKind::LongEma), Some(&[][..]));
}
