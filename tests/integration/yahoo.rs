//! Integration tests for the Yahoo chart client and provider

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use std::sync::Arc;
use stockfinder::models::Timeframe;
use stockfinder::services::market_data::{BarsRequest, MarketDataError, MarketDataProvider};
use stockfinder::services::yahoo::{YahooMarketDataProvider, YahooRestClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::chart_fixtures::{chart_body, mock_chart, mock_missing_chart, HOUR, START};

fn ts(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap()
}

fn client(server: &MockServer) -> YahooRestClient {
    YahooRestClient::with_client(server.uri(), reqwest::Client::new())
}

fn provider(server: &MockServer) -> YahooMarketDataProvider {
    YahooMarketDataProvider::with_client(Arc::new(client(server)))
}

fn window() -> (DateTime<Utc>, DateTime<Utc>) {
    let end = ts(START) + Duration::days(30);
    (end - Duration::days(365), end)
}

#[tokio::test]
async fn chart_drops_null_rows_and_sorts() {
    let server = MockServer::start().await;
    let body = json!({
        "chart": {
            "result": [{
                "timestamp": [START + 2 * HOUR, START, START + HOUR],
                "indicators": {
                    "quote": [{
                        "open": [102.0, 100.0, null],
                        "high": [103.0, 101.0, 102.0],
                        "low": [101.0, 99.0, 100.0],
                        "close": [102.5, 100.5, 101.5],
                        "volume": [10, null, 30]
                    }]
                }
            }],
            "error": null
        }
    });
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/TCS.NS"))
        .and(query_param("interval", "1d"))
        .and(query_param("includePrePost", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let (start, end) = window();
    let bars = client(&server)
        .chart("TCS.NS", "1d", start, end)
        .await
        .expect("chart parses");

    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0].timestamp, ts(START));
    assert_eq!(bars[0].volume, None);
    assert_eq!(bars[1].close, 102.5);
    assert_eq!(bars[1].volume, Some(10.0));
}

#[tokio::test]
async fn chart_sends_requested_window() {
    let server = MockServer::start().await;
    let (start, end) = window();
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/INFY.NS"))
        .and(query_param("period1", start.timestamp().to_string()))
        .and(query_param("period2", end.timestamp().to_string()))
        .and(query_param("interval", "1mo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(&[(START, 1.0, 2.0, 0.5, 1.5)])))
        .expect(1)
        .mount(&server)
        .await;

    let request = BarsRequest {
        symbol: "INFY.NS".to_string(),
        timeframe: Timeframe::Monthly,
        start,
        end,
    };
    let bars = provider(&server).get_bars(&request).await.expect("bars");

    assert_eq!(bars.len(), 1);
}

#[tokio::test]
async fn missing_symbol_reports_status_and_description() {
    let server = MockServer::start().await;
    mock_missing_chart(&server, "GONE.NS").await;

    let (start, end) = window();
    let err = client(&server)
        .chart("GONE.NS", "1d", start, end)
        .await
        .expect_err("404 is an error");

    match err {
        MarketDataError::Status { status, message } => {
            assert_eq!(status, 404);
            assert!(message.contains("delisted"), "unexpected message: {}", message);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(!MarketDataError::Status { status: 404, message: String::new() }.is_transient());
}

#[tokio::test]
async fn empty_result_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/SBIN.NS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "chart": { "result": [{ "indicators": { "quote": [{}] } }], "error": null }
        })))
        .mount(&server)
        .await;

    let (start, end) = window();
    let bars = client(&server).chart("SBIN.NS", "60m", start, end).await.expect("ok");

    assert!(bars.is_empty());
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/BAD.NS"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .mount(&server)
        .await;

    let (start, end) = window();
    let err = client(&server).chart("BAD.NS", "1d", start, end).await.unwrap_err();

    assert!(matches!(err, MarketDataError::Decode(_)));
}

#[tokio::test]
async fn two_hour_timeframe_aggregates_hourly_bars() {
    let server = MockServer::start().await;
    let rows = [
        (START, 100.0, 101.0, 99.0, 100.5),
        (START + HOUR, 100.5, 103.0, 100.0, 102.0),
        (START + 2 * HOUR, 102.0, 102.5, 98.0, 99.0),
    ];
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/HDFCBANK.NS"))
        .and(query_param("interval", "60m"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(&rows)))
        .mount(&server)
        .await;

    let (start, end) = window();
    let request = BarsRequest {
        symbol: "HDFCBANK.NS".to_string(),
        timeframe: Timeframe::Hour2,
        start,
        end,
    };
    let bars = provider(&server).get_bars(&request).await.expect("bars");

    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0].open, 100.0);
    assert_eq!(bars[0].high, 103.0);
    assert_eq!(bars[0].low, 99.0);
    assert_eq!(bars[0].close, 102.0);
    assert_eq!(bars[0].volume, Some(2000.0));
    assert_eq!(bars[1].timestamp, ts(START + 2 * HOUR));
}

#[tokio::test]
async fn server_errors_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/RELIANCE.NS"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    mock_chart(&server, "RELIANCE.NS", &[(START, 1.0, 2.0, 0.5, 1.5)]).await;

    let (start, end) = window();
    let bars = client(&server)
        .with_retries(1)
        .chart("RELIANCE.NS", "1d", start, end)
        .await
        .expect("second attempt succeeds");

    assert_eq!(bars.len(), 1);
}

#[tokio::test]
async fn server_errors_surface_without_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/RELIANCE.NS"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let (start, end) = window();
    let err = client(&server)
        .chart("RELIANCE.NS", "1d", start, end)
        .await
        .unwrap_err();

    assert!(err.is_transient());
}
