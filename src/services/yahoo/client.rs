//! Yahoo Finance chart REST client

use backon::{ExponentialBuilder, Retryable};
use chrono::{DateTime, Utc};
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::ProviderConfig;
use crate::models::Bar;
use crate::services::market_data::MarketDataError;

use super::response::ChartEnvelope;

/// The chart endpoint rejects requests without a browser-like agent.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

pub struct YahooRestClient {
    base_url: String,
    client: Client,
    retries: usize,
}

impl YahooRestClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, MarketDataError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;

        Ok(Self::with_client(config.base_url.clone(), client).with_retries(config.retries))
    }

    /// Build around an existing HTTP client. Retries are off until set.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            retries: 0,
        }
    }

    pub fn with_retries(mut self, retries: usize) -> Self {
        self.retries = retries;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch bars for `symbol` at a native chart `interval` (`60m`, `1d`, `1mo`).
    ///
    /// Transient failures are retried with exponential backoff.
    pub async fn chart(
        &self,
        symbol: &str,
        interval: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Bar>, MarketDataError> {
        let fetch = || self.chart_once(symbol, interval, start, end);

        fetch
            .retry(ExponentialBuilder::default().with_max_times(self.retries))
            .when(|e: &MarketDataError| e.is_transient())
            .notify(|e: &MarketDataError, delay: std::time::Duration| {
                warn!(
                    symbol = %symbol,
                    error = %e,
                    delay_ms = delay.as_millis() as u64,
                    "Chart request failed, retrying"
                );
            })
            .await
    }

    async fn chart_once(
        &self,
        symbol: &str,
        interval: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Bar>, MarketDataError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        let query = [
            ("period1", start.timestamp().to_string()),
            ("period2", end.timestamp().to_string()),
            ("interval", interval.to_string()),
            ("includePrePost", "false".to_string()),
        ];

        debug!(symbol = %symbol, interval = %interval, "Requesting chart");
        let response = self.client.get(&url).query(&query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ChartEnvelope>(&body)
                .ok()
                .and_then(|envelope| envelope.chart.error)
                .map(|err| err.description)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
            return Err(MarketDataError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ChartEnvelope =
            serde_json::from_str(&body).map_err(|e| MarketDataError::Decode(e.to_string()))?;

        if let Some(err) = envelope.chart.error {
            return Err(MarketDataError::Api(format!("{}: {}", err.code, err.description)));
        }

        let bars = envelope
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .map(|result| result.into_bars())
            .unwrap_or_default();

        debug!(symbol = %symbol, count = bars.len(), "Chart parsed");
        Ok(bars)
    }
}
