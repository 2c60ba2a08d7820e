//! StockFinder: a moving-average setup screener for a fixed list of NSE equities.

pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod setups;
