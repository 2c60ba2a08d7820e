//! StockFinder CLI
//!
//! Runs one scan over the fixed symbol list and prints the matches.

use clap::Parser;
use dotenvy::dotenv;
use std::sync::Arc;
use stockfinder::config::{self, ProviderConfig};
use stockfinder::core::console::render_report;
use stockfinder::core::runtime::{RuntimeConfig, ScreenerRuntime};
use stockfinder::logging;
use stockfinder::models::{IndicatorKind, ScanSummary, Selection, Setup, Timeframe};
use stockfinder::services::yahoo::YahooMarketDataProvider;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about = "Nifty stock screener")]
struct Cli {
    /// Bar granularity: 1h, 2h, 3h, 4h, daily, monthly
    #[arg(long, env = "SCAN_TIMEFRAME", default_value = "1h")]
    timeframe: Timeframe,

    /// Indicator to report alongside each match: ema20, sma30, ema200
    #[arg(long, env = "SCAN_INDICATOR", default_value = "ema20")]
    indicator: IndicatorKind,

    /// Setup to screen for: ema200-support, sma30-support, monthly-breakout
    #[arg(long, env = "SCAN_SETUP", default_value = "ema200-support")]
    setup: Setup,

    /// Print the full scan result as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let selection = Selection {
        timeframe: cli.timeframe,
        indicator: cli.indicator,
        setup: cli.setup,
    };

    info!(environment = %config::get_environment(), "Starting StockFinder scan");

    let provider = YahooMarketDataProvider::new(&ProviderConfig::from_env())?;
    let runtime = ScreenerRuntime::new(RuntimeConfig::from_env(), Arc::new(provider));
    let report = runtime.run(selection).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&ScanSummary::from(&report))?);
    } else {
        println!("{}", render_report(&report));
    }

    Ok(())
}
