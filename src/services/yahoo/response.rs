//! Yahoo Finance chart API response shapes

use chrono::DateTime;
use serde::Deserialize;

use crate::models::Bar;

#[derive(Debug, Deserialize)]
pub struct ChartEnvelope {
    pub chart: ChartBody,
}

#[derive(Debug, Deserialize)]
pub struct ChartBody {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    /// Absent when the requested range holds no bars.
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
}

/// Column-oriented OHLCV arrays; entries are `null` for halted intervals.
#[derive(Debug, Default, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

fn at(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten()
}

impl ChartResult {
    /// Rows with any missing price are dropped; the rest come back sorted by
    /// timestamp with duplicates collapsed to the latest row.
    pub fn into_bars(self) -> Vec<Bar> {
        let quote = self.indicators.quote.into_iter().next().unwrap_or_default();

        let mut bars: Vec<Bar> = self
            .timestamp
            .iter()
            .enumerate()
            .filter_map(|(i, &secs)| {
                let timestamp = DateTime::from_timestamp(secs, 0)?;
                let bar = Bar::new(
                    at(&quote.open, i)?,
                    at(&quote.high, i)?,
                    at(&quote.low, i)?,
                    at(&quote.close, i)?,
                    timestamp,
                );
                Some(match at(&quote.volume, i) {
                    Some(volume) => bar.with_volume(volume),
                    None => bar,
                })
            })
            .collect();

        // stable sort keeps arrival order within a timestamp; keep the last one
        bars.sort_by_key(|b| b.timestamp);
        bars.reverse();
        bars.dedup_by_key(|b| b.timestamp);
        bars.reverse();
        bars
    }
}
