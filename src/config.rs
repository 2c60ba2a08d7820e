//! Environment-driven configuration.
//!
//! Values come from the process environment (optionally seeded from `.env`
//! by the binaries via `dotenvy`). Unset or unparsable values fall back to
//! the defaults below.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Symbols screened on every run.
pub const NIFTY_SYMBOLS: &[&str] = &[
    "RELIANCE.NS",
    "TCS.NS",
    "INFY.NS",
    "HDFCBANK.NS",
    "ICICIBANK.NS",
    "SBIN.NS",
];

pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_LOOKBACK_DAYS: i64 = 365;
pub const MAX_LOOKBACK_DAYS: i64 = 3650;
pub const DEFAULT_FETCH_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_FETCH_RETRIES: usize = 2;
pub const DEFAULT_PORT: u16 = 8080;

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Deployment environment name (`production`, `sandbox`, ...).
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

pub fn get_port() -> u16 {
    env_or("PORT", DEFAULT_PORT)
}

pub fn get_lookback_days() -> i64 {
    parse_lookback_days(env::var("LOOKBACK_DAYS").ok().as_deref())
}

/// Lookback in days, accepted only within `1..=MAX_LOOKBACK_DAYS`.
pub fn parse_lookback_days(raw: Option<&str>) -> i64 {
    match raw.and_then(|v| v.trim().parse::<i64>().ok()) {
        Some(days) if (1..=MAX_LOOKBACK_DAYS).contains(&days) => days,
        Some(days) => {
            tracing::warn!(
                lookback_days = days,
                default = DEFAULT_LOOKBACK_DAYS,
                "LOOKBACK_DAYS out of range, using default"
            );
            DEFAULT_LOOKBACK_DAYS
        }
        None => DEFAULT_LOOKBACK_DAYS,
    }
}

pub fn default_symbols() -> Vec<String> {
    NIFTY_SYMBOLS.iter().map(|s| s.to_string()).collect()
}

/// Settings for the Yahoo Finance chart client.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub retries: usize,
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("YAHOO_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_YAHOO_BASE_URL.to_string()),
            timeout: Duration::from_secs(env_or(
                "FETCH_TIMEOUT_SECONDS",
                DEFAULT_FETCH_TIMEOUT_SECONDS,
            )),
            retries: env_or("FETCH_RETRIES", DEFAULT_FETCH_RETRIES),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECONDS),
            retries: DEFAULT_FETCH_RETRIES,
        }
    }
}
