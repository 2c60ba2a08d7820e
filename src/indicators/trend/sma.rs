//! SMA (Simple Moving Average) indicator

use crate::models::IndicatorColumn;

/// Calculate the trailing SMA of every close.
///
/// Positions before the window fills are `None`.
pub fn calculate_sma(closes: &[f64], window: usize) -> IndicatorColumn {
    if window == 0 {
        return vec![None; closes.len()];
    }

    (0..closes.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let slice = &closes[i + 1 - window..=i];
            Some(slice.iter().sum::<f64>() / window as f64)
        })
        .collect()
}
