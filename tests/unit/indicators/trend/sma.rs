//! Unit tests for SMA indicator

use stockfinder::indicators::trend::calculate_sma;

#[test]
fn test_sma_undefined_until_window_fills() {
    let closes = vec![100.0; 29];
    let sma = calculate_sma(&closes, 30);

    assert_eq!(sma.len(), 29);
    assert!(sma.iter().all(|v| v.is_none()));
}

#[test]
fn test_sma_constant_close() {
    let closes = vec![100.0; 40];
    let sma = calculate_sma(&closes, 30);

    assert!(sma[..29].iter().all(|v| v.is_none()));
    assert!(sma[29..].iter().all(|v| *v == Some(100.0)));
}

#[test]
fn test_sma_trailing_window() {
    let closes: Vec<f64> = (1..=31).map(f64::from).collect();
    let sma = calculate_sma(&closes, 30);

    assert_eq!(sma[29], Some(15.5));
    assert_eq!(sma[30], Some(16.5));
}

#[test]
fn test_sma_zero_window() {
    let sma = calculate_sma(&[1.0, 2.0, 3.0], 0);
    assert_eq!(sma, vec![None, None, None]);
}
