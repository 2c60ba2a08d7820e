//! External data collaborators.

pub mod market_data;
pub mod yahoo;

pub use market_data::{BarsRequest, MarketDataError, MarketDataProvider};
