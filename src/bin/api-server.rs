//! StockFinder API Server
//!
//! Serves on-demand scans and the selectable options as JSON for a charting
//! front end.

use dotenvy::dotenv;
use std::sync::Arc;
use stockfinder::config::{self, ProviderConfig};
use stockfinder::core::http::start_server;
use stockfinder::core::runtime::{RuntimeConfig, ScreenerRuntime};
use stockfinder::logging;
use stockfinder::metrics::Metrics;
use stockfinder::services::yahoo::YahooMarketDataProvider;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();
    logging::init_logging();

    let port = config::get_port();
    let provider_config = ProviderConfig::from_env();

    info!("Starting StockFinder API Server");
    info!(environment = %config::get_environment(), "Environment");
    info!(base_url = %provider_config.base_url, "Market data source");

    let metrics = Arc::new(Metrics::new()?);
    let provider = YahooMarketDataProvider::new(&provider_config)?;
    let runtime = Arc::new(
        ScreenerRuntime::new(RuntimeConfig::from_env(), Arc::new(provider))
            .with_metrics(metrics.clone()),
    );

    let server = start_server(port, runtime, metrics);

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        result = server => {
            if let Err(e) = result {
                error!(error = %e, "HTTP server stopped");
            }
        }
    }

    Ok(())
}
