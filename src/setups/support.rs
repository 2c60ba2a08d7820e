//! Support candle: a rising close that finishes near a moving average.

use crate::models::Bar;

/// Maximum relative distance between close and indicator.
pub const SUPPORT_TOLERANCE: f64 = 0.01;

/// Relative distance of `close` from `indicator`.
///
/// `None` when the indicator is missing, non-finite or not strictly
/// positive; such positions can never be support.
pub fn distance_from_indicator(close: f64, indicator: Option<f64>) -> Option<f64> {
    let level = indicator?;
    if !level.is_finite() || level <= 0.0 {
        return None;
    }
    Some((close - level).abs() / level)
}

/// Whether the bar at `index` is a support candle against `indicator`.
pub fn is_support_candle(bars: &[Bar], indicator: &[Option<f64>], index: usize) -> bool {
    if index == 0 || index >= bars.len() {
        return false;
    }
    let close = bars[index].close;
    if close <= bars[index - 1].close {
        return false;
    }
    let level = indicator.get(index).copied().flatten();
    matches!(distance_from_indicator(close, level), Some(d) if d < SUPPORT_TOLERANCE)
}

/// First support candle scanning from the second bar.
pub fn find_support_candle(bars: &[Bar], indicator: &[Option<f64>]) -> Option<usize> {
    (1..bars.len()).find(|&i| is_support_candle(bars, indicator, i))
}
