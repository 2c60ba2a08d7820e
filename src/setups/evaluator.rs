//! Setup evaluation over an indicator-augmented series

use std::borrow::Cow;

use crate::indicators::compute_column;
use crate::models::{Series, Setup};

use super::breakout::find_breakout;
use super::support::find_support_candle;

/// Bars a series needs before the screener evaluates it.
pub const MIN_BARS: usize = 30;

/// Result of testing one series against one setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupOutcome {
    pub matched: bool,
    pub trigger_index: Option<usize>,
}

impl SetupOutcome {
    fn from_trigger(trigger_index: Option<usize>) -> Self {
        Self {
            matched: trigger_index.is_some(),
            trigger_index,
        }
    }
}

pub struct SetupEvaluator;

impl SetupEvaluator {
    /// Test `series` against `setup` without modifying it.
    ///
    /// Support setups read the series' indicator column; when the series was
    /// never augmented the column is computed on the side from the closes.
    pub fn evaluate(series: &Series, setup: Setup) -> SetupOutcome {
        let trigger = match setup.support_indicator() {
            None => find_breakout(&series.bars),
            Some(kind) => {
                let column = match series.column(kind) {
                    Some(column) => Cow::Borrowed(column),
                    None => Cow::Owned(compute_column(kind, &series.closes())),
                };
                find_support_candle(&series.bars, &column)
            }
        };
        SetupOutcome::from_trigger(trigger)
    }

    pub fn matches(series: &Series, setup: Setup) -> bool {
        Self::evaluate(series, setup).matched
    }

    pub fn has_enough_history(series: &Series) -> bool {
        series.len() >= MIN_BARS
    }
}
