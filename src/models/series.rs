use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::bar::Bar;
use super::selection::{IndicatorKind, Timeframe};

/// A column value is `None` where the indicator lacks history.
pub type IndicatorColumn = Vec<Option<f64>>;

/// Ordered bars for one symbol plus indicator columns aligned to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub bars: Vec<Bar>,
    #[serde(default)]
    columns: BTreeMap<IndicatorKind, IndicatorColumn>,
}

impl Series {
    pub fn new(symbol: impl Into<String>, timeframe: Timeframe, bars: Vec<Bar>) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe,
            bars,
            columns: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn last_bar(&self) -> Option<&Bar> {
        self.bars.last()
    }

    pub fn column(&self, kind: IndicatorKind) -> Option<&[Option<f64>]> {
        self.columns.get(&kind).map(Vec::as_slice)
    }

    /// Indicator value at `index`, `None` when the column is missing or undefined there.
    pub fn value(&self, kind: IndicatorKind, index: usize) -> Option<f64> {
        self.columns.get(&kind)?.get(index).copied().flatten()
    }

    pub fn has_column(&self, kind: IndicatorKind) -> bool {
        self.columns.contains_key(&kind)
    }

    /// Replaces a column. Columns must match the bar count.
    pub(crate) fn set_column(&mut self, kind: IndicatorKind, values: IndicatorColumn) {
        debug_assert_eq!(values.len(), self.bars.len(), "indicator column misaligned");
        self.columns.insert(kind, values);
    }
}
