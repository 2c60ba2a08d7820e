//! Hourly bar aggregation for timeframes the chart API does not serve.

use chrono::{DateTime, NaiveDate};

use crate::models::Bar;

/// Merge ordered intraday bars into buckets of `minutes`.
///
/// Buckets are anchored to the first bar of each UTC trading day, so a
/// session opening at 03:45 yields 03:45, 05:45, ... candles of equal width.
/// Each bucket takes the first open, the highest high, the lowest low and
/// the last close; volume is summed when present.
pub fn aggregate_bars(bars: &[Bar], minutes: u32) -> Vec<Bar> {
    let interval = i64::from(minutes.max(1)) * 60;
    let mut aggregated: Vec<Bar> = Vec::new();
    let mut session: Option<(NaiveDate, i64)> = None;
    let mut current: Option<(i64, Bar)> = None;

    for bar in bars {
        let secs = bar.timestamp.timestamp();
        let day = bar.timestamp.date_naive();
        let session_open = match session {
            Some((d, open)) if d == day => open,
            _ => {
                session = Some((day, secs));
                secs
            }
        };
        let bucket_start = session_open + (secs - session_open).div_euclid(interval) * interval;

        match current.as_mut() {
            Some((start, agg)) if *start == bucket_start => {
                agg.high = agg.high.max(bar.high);
                agg.low = agg.low.min(bar.low);
                agg.close = bar.close;
                agg.volume = match (agg.volume, bar.volume) {
                    (Some(a), Some(b)) => Some(a + b),
                    (a, b) => a.or(b),
                };
            }
            _ => {
                if let Some((_, done)) = current.take() {
                    aggregated.push(done);
                }
                let mut opened = bar.clone();
                if let Some(ts) = DateTime::from_timestamp(bucket_start, 0) {
                    opened.timestamp = ts;
                }
                current = Some((bucket_start, opened));
            }
        }
    }

    if let Some((_, done)) = current {
        aggregated.push(done);
    }

    aggregated
}
