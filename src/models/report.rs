//! Screening results and the payload handed to the presentation layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::bar::Bar;
use super::selection::{IndicatorKind, Selection, Setup, Timeframe};
use super::series::Series;

/// A symbol whose series satisfied the selected setup.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub symbol: String,
    pub series: Series,
    /// Bar that satisfied the setup.
    pub trigger_index: Option<usize>,
}

/// Why a symbol produced no evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    FetchFailed { message: String },
    NoData,
    InsufficientHistory { bars: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedSymbol {
    pub symbol: String,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Outcome of one pass over the symbol list. Matches and skips keep the
/// symbol list order.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub selection: Selection,
    pub scanned: usize,
    pub matches: Vec<Match>,
    pub skipped: Vec<SkippedSymbol>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ScanReport {
    pub fn matched_symbols(&self) -> Vec<&str> {
        self.matches.iter().map(|m| m.symbol.as_str()).collect()
    }

    /// Fetch failures, in scan order.
    pub fn fetch_errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.skipped.iter().filter_map(|s| match &s.reason {
            SkipReason::FetchFailed { message } => Some((s.symbol.as_str(), message.as_str())),
            _ => None,
        })
    }

    pub fn chart_payloads(&self) -> Vec<ChartPayload> {
        self.matches
            .iter()
            .map(|m| ChartPayload::from_match(m, self.selection.indicator))
            .collect()
    }
}

/// What the presentation layer needs to draw one match: candles plus the
/// highlighted indicator line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub highlighted: IndicatorKind,
    pub bars: Vec<Bar>,
    pub highlight: Vec<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_index: Option<usize>,
}

impl ChartPayload {
    pub fn from_match(m: &Match, highlighted: IndicatorKind) -> Self {
        let highlight = m
            .series
            .column(highlighted)
            .map(<[Option<f64>]>::to_vec)
            .unwrap_or_else(|| vec![None; m.series.len()]);

        Self {
            symbol: m.symbol.clone(),
            timeframe: m.series.timeframe,
            highlighted,
            bars: m.series.bars.clone(),
            highlight,
            trigger_index: m.trigger_index,
        }
    }

    /// Most recent defined value of the highlighted indicator.
    pub fn latest_highlight(&self) -> Option<f64> {
        self.highlight.iter().rev().find_map(|v| *v)
    }
}

/// Serializable view of a [`ScanReport`] for the HTTP API and `--json` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSummary {
    pub timeframe: Timeframe,
    pub setup: Setup,
    pub indicator: IndicatorKind,
    pub scanned: usize,
    pub matches: Vec<ChartPayload>,
    pub skipped: Vec<SkippedSymbol>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl From<&ScanReport> for ScanSummary {
    fn from(report: &ScanReport) -> Self {
        Self {
            timeframe: report.selection.timeframe,
            setup: report.selection.setup,
            indicator: report.selection.indicator,
            scanned: report.scanned,
            matches: report.chart_payloads(),
            skipped: report.skipped.clone(),
            started_at: report.started_at,
            finished_at: report.finished_at,
        }
    }
}
