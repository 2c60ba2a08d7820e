//! Previous-high breakout

use crate::models::Bar;

/// Index of the last bar when its close clears the previous bar's high.
pub fn find_breakout(bars: &[Bar]) -> Option<usize> {
    let [.., prev, last] = bars else {
        return None;
    };
    (last.close > prev.high).then_some(bars.len() - 1)
}
