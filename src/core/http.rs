//! HTTP endpoint server using Axum
//!
//! Serves scan results as JSON for a charting front end.

use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use crate::core::runtime::ScreenerRuntime;
use crate::metrics::Metrics;
use crate::models::{IndicatorKind, ScanSummary, Selection, SelectionError, Setup, Timeframe};

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub runtime: Arc<ScreenerRuntime>,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

type ApiError = (StatusCode, Json<Value>);

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "stockfinder"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Default, Deserialize)]
pub struct ScanQuery {
    timeframe: Option<String>,
    setup: Option<String>,
    indicator: Option<String>,
}

fn parse_or<T: FromStr<Err = SelectionError>>(value: Option<&str>, default: T) -> Result<T, SelectionError> {
    value.map(T::from_str).unwrap_or(Ok(default))
}

impl ScanQuery {
    /// Missing parameters fall back to the default selection.
    pub fn selection(&self) -> Result<Selection, SelectionError> {
        let defaults = Selection::default();
        Ok(Selection {
            timeframe: parse_or(self.timeframe.as_deref(), defaults.timeframe)?,
            indicator: parse_or(self.indicator.as_deref(), defaults.indicator)?,
            setup: parse_or(self.setup.as_deref(), defaults.setup)?,
        })
    }
}

async fn list_symbols(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "symbols": state.runtime.symbols() }))
}

fn choices<T>(all: &[T], slug: fn(&T) -> &'static str, label: fn(&T) -> &'static str) -> Vec<Value> {
    all.iter()
        .map(|item| json!({ "value": slug(item), "label": label(item) }))
        .collect()
}

async fn list_selections() -> Json<Value> {
    Json(json!({
        "timeframes": choices(Timeframe::all(), Timeframe::slug, Timeframe::label),
        "indicators": choices(IndicatorKind::all(), IndicatorKind::slug, IndicatorKind::label),
        "setups": choices(Setup::all(), Setup::slug, Setup::label),
    }))
}

/// Run a scan for the requested selection
async fn scan(
    State(state): State<AppState>,
    Query(query): Query<ScanQuery>,
) -> Result<Json<ScanSummary>, ApiError> {
    let selection = query
        .selection()
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))))?;

    let report = state.runtime.run(selection).await;
    Ok(Json(ScanSummary::from(&report)))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/symbols", get(list_symbols))
        .route("/api/selections", get(list_selections))
        .route("/api/scan", get(scan))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(
    port: u16,
    runtime: Arc<ScreenerRuntime>,
    metrics: Arc<Metrics>,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics,
        start_time: Arc::new(Instant::now()),
        runtime,
    };
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
