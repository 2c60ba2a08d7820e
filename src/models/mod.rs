//! Shared data models spanning the screener layers.

pub mod bar;
pub mod report;
pub mod selection;
pub mod series;

pub use bar::Bar;
pub use report::{ChartPayload, Match, ScanReport, ScanSummary, SkipReason, SkippedSymbol};
pub use selection::{IndicatorKind, Selection, SelectionError, Setup, Timeframe};
pub use series::{IndicatorColumn, Series};
