//! Adds the screener's indicator columns to a series.

use crate::models::{IndicatorColumn, IndicatorKind, Series};

use super::trend::{calculate_ema, calculate_sma};

/// Compute one indicator column from closes.
pub fn compute_column(kind: IndicatorKind, closes: &[f64]) -> IndicatorColumn {
    match kind {
        IndicatorKind::ShortEma | IndicatorKind::LongEma => calculate_ema(closes, kind.period()),
        IndicatorKind::MediumSma => calculate_sma(closes, kind.period()),
    }
}

/// Recompute every indicator column in place. Existing columns are
/// overwritten, so repeated calls give identical values.
pub fn augment_in_place(series: &mut Series) {
    let closes = series.closes();
    for &kind in IndicatorKind::all() {
        series.set_column(kind, compute_column(kind, &closes));
    }
}

/// Return the series with 20 EMA, 30 SMA and 200 EMA columns attached.
pub fn augment(mut series: Series) -> Series {
    augment_in_place(&mut series);
    series
}
