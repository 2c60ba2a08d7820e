//! Chart-pattern setups the screener tests each series against.

pub mod breakout;
pub mod evaluator;
pub mod support;

pub use evaluator::{SetupEvaluator, SetupOutcome, MIN_BARS};
