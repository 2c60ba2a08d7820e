//! Yahoo Finance market data provider implementation

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::ProviderConfig;
use crate::models::{Bar, Timeframe};
use crate::services::market_data::{BarsRequest, MarketDataError, MarketDataProvider};

use super::aggregate::aggregate_bars;
use super::client::YahooRestClient;

/// Native chart interval to request, plus the bucket width in minutes when
/// the bars must be merged locally.
pub fn source_interval(timeframe: Timeframe) -> (&'static str, Option<u32>) {
    match timeframe {
        Timeframe::Hour1 => ("60m", None),
        Timeframe::Hour2 | Timeframe::Hour3 | Timeframe::Hour4 => ("60m", timeframe.minutes()),
        Timeframe::Daily => ("1d", None),
        Timeframe::Monthly => ("1mo", None),
    }
}

pub struct YahooMarketDataProvider {
    client: Arc<YahooRestClient>,
}

impl YahooMarketDataProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, MarketDataError> {
        Ok(Self::with_client(Arc::new(YahooRestClient::new(config)?)))
    }

    pub fn with_client(client: Arc<YahooRestClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<YahooRestClient> {
        &self.client
    }
}

#[async_trait]
impl MarketDataProvider for YahooMarketDataProvider {
    async fn get_bars(&self, request: &BarsRequest) -> Result<Vec<Bar>, MarketDataError> {
        let (interval, bucket_minutes) = source_interval(request.timeframe);
        let bars = self
            .client
            .chart(&request.symbol, interval, request.start, request.end)
            .await?;

        Ok(match bucket_minutes {
            Some(minutes) => aggregate_bars(&bars, minutes),
            None => bars,
        })
    }
}
