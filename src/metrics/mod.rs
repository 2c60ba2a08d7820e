//! Prometheus metrics for scans and the HTTP surface

use prometheus::{Encoder, Gauge, Histogram, HistogramOpts, IntCounter, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub scans_total: IntCounter,
    pub symbols_scanned_total: IntCounter,
    pub fetch_failures_total: IntCounter,
    pub matches_total: IntCounter,
    pub fetch_duration_seconds: Histogram,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: Gauge,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let scans_total = IntCounter::new("screener_scans_total", "Completed screening runs")?;
        let symbols_scanned_total =
            IntCounter::new("screener_symbols_scanned_total", "Symbols processed by the screener")?;
        let fetch_failures_total = IntCounter::new(
            "screener_fetch_failures_total",
            "Symbols skipped because the market data fetch failed",
        )?;
        let matches_total =
            IntCounter::new("screener_matches_total", "Symbols that satisfied the selected setup")?;
        let fetch_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "screener_fetch_duration_seconds",
            "Market data fetch latency per symbol",
        ))?;
        let http_requests_total = IntCounter::new("http_requests_total", "HTTP requests served")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency",
        ))?;
        let http_requests_in_flight =
            Gauge::new("http_requests_in_flight", "HTTP requests currently being served")?;

        registry.register(Box::new(scans_total.clone()))?;
        registry.register(Box::new(symbols_scanned_total.clone()))?;
        registry.register(Box::new(fetch_failures_total.clone()))?;
        registry.register(Box::new(matches_total.clone()))?;
        registry.register(Box::new(fetch_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;

        Ok(Self {
            registry,
            scans_total,
            symbols_scanned_total,
            fetch_failures_total,
            matches_total,
            fetch_duration_seconds,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
        })
    }

    /// Render all metrics in the Prometheus text format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
