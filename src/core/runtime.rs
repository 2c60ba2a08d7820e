//! Screener loop: fetch, augment and evaluate each symbol in order

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{default_symbols, get_lookback_days, DEFAULT_LOOKBACK_DAYS};
use crate::indicators;
use crate::metrics::Metrics;
use crate::models::{Match, ScanReport, Selection, Series, SkipReason, SkippedSymbol};
use crate::services::market_data::{BarsRequest, MarketDataError, MarketDataProvider};
use crate::setups::{SetupEvaluator, MIN_BARS};

/// Configuration for the screener runtime
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub symbols: Vec<String>,
    pub lookback_days: i64,
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        Self {
            symbols: default_symbols(),
            lookback_days: get_lookback_days(),
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            symbols: default_symbols(),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}

/// Why one symbol produced no evaluation.
#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("Error fetching data for {symbol}: {source}")]
    Fetch {
        symbol: String,
        #[source]
        source: MarketDataError,
    },

    #[error("no data returned for {symbol}")]
    NoData { symbol: String },

    #[error("{symbol} has {bars} bars, at least {min} required", min = MIN_BARS)]
    InsufficientHistory { symbol: String, bars: usize },
}

impl ScreenError {
    pub fn into_skipped(self) -> SkippedSymbol {
        match self {
            ScreenError::Fetch { symbol, source } => SkippedSymbol {
                symbol,
                reason: SkipReason::FetchFailed {
                    message: source.to_string(),
                },
            },
            ScreenError::NoData { symbol } => SkippedSymbol {
                symbol,
                reason: SkipReason::NoData,
            },
            ScreenError::InsufficientHistory { symbol, bars } => SkippedSymbol {
                symbol,
                reason: SkipReason::InsufficientHistory { bars },
            },
        }
    }
}

/// Runs the screener over a fixed symbol list, one symbol at a time.
pub struct ScreenerRuntime {
    config: RuntimeConfig,
    provider: Arc<dyn MarketDataProvider + Send + Sync>,
    metrics: Option<Arc<Metrics>>,
}

impl ScreenerRuntime {
    pub fn new(config: RuntimeConfig, provider: Arc<dyn MarketDataProvider + Send + Sync>) -> Self {
        Self {
            config,
            provider,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn symbols(&self) -> &[String] {
        &self.config.symbols
    }

    /// Screen every symbol with bars ending now.
    pub async fn run(&self, selection: Selection) -> ScanReport {
        self.run_at(selection, Utc::now()).await
    }

    /// Screen every symbol with bars ending at `end`.
    ///
    /// A failing symbol is recorded as skipped and never stops the run.
    pub async fn run_at(&self, selection: Selection, end: DateTime<Utc>) -> ScanReport {
        let total = self.config.symbols.len();
        let mut report = ScanReport {
            selection,
            scanned: 0,
            matches: Vec::new(),
            skipped: Vec::new(),
            started_at: Utc::now(),
            finished_at: Utc::now(),
        };

        info!(
            timeframe = %selection.timeframe,
            setup = %selection.setup,
            symbols = total,
            "Starting scan"
        );

        for (idx, symbol) in self.config.symbols.iter().enumerate() {
            info!(symbol = %symbol, "Scanning: {} ({}/{})", symbol, idx + 1, total);

            match self.screen_symbol(symbol, selection, end).await {
                Ok(Some(found)) => {
                    info!(symbol = %symbol, trigger_index = ?found.trigger_index, "Setup matched");
                    report.matches.push(found);
                }
                Ok(None) => debug!(symbol = %symbol, "Setup not matched"),
                Err(e) => {
                    match &e {
                        ScreenError::Fetch { .. } => {
                            warn!(symbol = %symbol, error = %e, "Skipping symbol");
                            if let Some(ref metrics) = self.metrics {
                                metrics.fetch_failures_total.inc();
                            }
                        }
                        _ => debug!(symbol = %symbol, reason = %e, "Skipping symbol"),
                    }
                    report.skipped.push(e.into_skipped());
                }
            }
            report.scanned += 1;
        }

        report.finished_at = Utc::now();

        if let Some(ref metrics) = self.metrics {
            metrics.scans_total.inc();
            metrics.symbols_scanned_total.inc_by(report.scanned as u64);
            metrics.matches_total.inc_by(report.matches.len() as u64);
        }

        info!(
            scanned = report.scanned,
            matches = report.matches.len(),
            skipped = report.skipped.len(),
            "Scan finished"
        );
        report
    }

    /// Fetch, augment and evaluate one symbol.
    ///
    /// `Ok(None)` means the series was evaluated and did not match.
    pub async fn screen_symbol(
        &self,
        symbol: &str,
        selection: Selection,
        end: DateTime<Utc>,
    ) -> Result<Option<Match>, ScreenError> {
        let request = BarsRequest::trailing(symbol, selection.timeframe, end, self.config.lookback_days);

        let started = Instant::now();
        let fetched = self.provider.get_bars(&request).await;
        if let Some(ref metrics) = self.metrics {
            metrics
                .fetch_duration_seconds
                .observe(started.elapsed().as_secs_f64());
        }

        let bars = fetched.map_err(|source| ScreenError::Fetch {
            symbol: symbol.to_string(),
            source,
        })?;

        if bars.is_empty() {
            return Err(ScreenError::NoData {
                symbol: symbol.to_string(),
            });
        }

        let series = Series::new(symbol, selection.timeframe, bars);
        if !SetupEvaluator::has_enough_history(&series) {
            return Err(ScreenError::InsufficientHistory {
                symbol: symbol.to_string(),
                bars: series.len(),
            });
        }

        let series = indicators::augment(series);
        let outcome = SetupEvaluator::evaluate(&series, selection.setup);

        Ok(outcome.matched.then(|| Match {
            symbol: symbol.to_string(),
            series,
            trigger_index: outcome.trigger_index,
        }))
    }
}
