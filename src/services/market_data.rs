//! Market data provider interface consumed by the screener.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::models::{Bar, Timeframe};

/// One symbol's bar request over a closed date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarsRequest {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BarsRequest {
    /// Request the `lookback_days` leading up to `end`.
    ///
    /// Negative lookbacks collapse to an empty window at `end`; lookbacks past
    /// the representable range start at the earliest representable instant.
    pub fn trailing(
        symbol: impl Into<String>,
        timeframe: Timeframe,
        end: DateTime<Utc>,
        lookback_days: i64,
    ) -> Self {
        let start = Duration::try_days(lookback_days.max(0))
            .and_then(|span| end.checked_sub_signed(span))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        Self {
            symbol: symbol.into(),
            timeframe,
            start,
            end,
        }
    }
}

/// Errors that can occur while fetching bars.
#[derive(Debug, Error)]
pub enum MarketDataError {
    /// Network failure, timeout or client construction error.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The API answered but reported an error (e.g. unknown symbol).
    #[error("API error: {0}")]
    Api(String),

    /// The response body could not be understood.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl MarketDataError {
    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            MarketDataError::Request(e) => e.is_timeout() || e.is_connect(),
            MarketDataError::Status { status, .. } => *status == 429 || *status >= 500,
            MarketDataError::Api(_) | MarketDataError::Decode(_) => false,
        }
    }
}

#[async_trait]
pub trait MarketDataProvider {
    /// Ordered bars for the request; an empty vector when the range has no data.
    async fn get_bars(&self, request: &BarsRequest) -> Result<Vec<Bar>, MarketDataError>;
}
