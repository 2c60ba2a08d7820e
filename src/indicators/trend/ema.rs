//! EMA (Exponential Moving Average) indicator

use crate::models::IndicatorColumn;

/// Smoothing factor for a span: α = 2 / (span + 1).
pub fn smoothing_factor(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

/// Calculate the EMA of every close.
///
/// Seeded with the first close and updated with
/// `ema[i] = α·close[i] + (1 − α)·ema[i − 1]`, so each value is defined from
/// the first bar onward and depends only on closes up to its own position.
pub fn calculate_ema(closes: &[f64], span: usize) -> IndicatorColumn {
    let alpha = smoothing_factor(span);
    let mut prev: Option<f64> = None;

    closes
        .iter()
        .map(|&close| {
            let ema = match prev {
                Some(p) => alpha * close + (1.0 - alpha) * p,
                None => close,
            };
            prev = Some(ema);
            Some(ema)
        })
        .collect()
}
