// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// All endpoints live under `/api/v1/`:
//
//   GET  /api/v1/health       liveness, server time, cached provider readiness
//   GET  /api/v1/markets      configured BASE/QUOTE list
//   GET  /api/v1/status       cached provider status (?refresh=true re-validates)
//   POST /api/v1/signal       fetch rates, analyze, return a TradingSignal
//   GET  /api/v1/next-candle  next minute boundary + countdown
//
// CORS is configured permissively; the service is meant to sit behind a
// dashboard on another origin.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::analyzer::TradingSignal;
use crate::app_state::AppState;
use crate::clock::{self, Countdown};
use crate::currencylayer::describe_error;
use crate::types::CurrencyPair;

type ApiError = (StatusCode, Json<serde_json::Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(serde_json::json!({ "error": message.into() })))
}

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/markets", get(markets))
        .route("/api/v1/status", get(api_status))
        .route("/api/v1/signal", post(generate_signal))
        .route("/api/v1/next-candle", get(next_candle))
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Health
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    server_time: i64,
    uptime_secs: u64,
    api_ready: bool,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        server_time: clock::now_ms(),
        uptime_secs: state.uptime_secs(),
        api_ready: state.api_ready(),
    })
}

// =============================================================================
// Markets
// =============================================================================

#[derive(Serialize)]
struct MarketsResponse {
    markets: Vec<String>,
}

async fn markets(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let markets = state.runtime_config.markets.clone();
    Json(MarketsResponse { markets })
}

// =============================================================================
// Provider status
// =============================================================================

#[derive(Deserialize)]
struct StatusQuery {
    #[serde(default)]
    refresh: bool,
}

async fn api_status(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StatusQuery>,
) -> impl IntoResponse {
    let status = match state.cached_api_status() {
        Some(status) if !query.refresh => status,
        _ => state.refresh_api_status().await,
    };
    Json(status)
}

// =============================================================================
// Signal generation
// =============================================================================

#[derive(Deserialize)]
struct SignalRequest {
    pair: String,
}

async fn generate_signal(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignalRequest>,
) -> Result<Json<TradingSignal>, ApiError> {
    let pair = CurrencyPair::parse(&req.pair)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;

    if !state.runtime_config.is_supported_market(&pair) {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            format!("Unsupported market: {pair}"),
        ));
    }

    if !state.gateway.has_api_key() {
        return Err(api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "CurrencyLayer API key is not configured",
        ));
    }

    let _guard = state.analysis_lock.lock().await;

    let data = state
        .gateway
        .get_market_data_for_analysis(&pair)
        .await
        .map_err(|e| {
            warn!(%pair, error = %e, "market data fetch failed");
            api_error(StatusCode::BAD_GATEWAY, describe_error(&e))
        })?;

    let signal = state
        .analyzer
        .analyze_market(&pair.to_string(), &data.current, &data.historical)
        .map_err(|e| {
            warn!(%pair, error = %e, "analysis failed");
            api_error(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
        })?;

    info!(
        %pair,
        signal = %signal.signal,
        confidence = signal.confidence,
        trend = %signal.trend,
        confirmations = signal.confirmation_count,
        "Signal generated"
    );

    Ok(Json(signal))
}

// =============================================================================
// Next candle
// =============================================================================

#[derive(Serialize)]
struct NextCandleResponse {
    next_candle_time: i64,
    countdown: Countdown,
}

async fn next_candle() -> impl IntoResponse {
    let now = clock::now_ms();
    let next_candle_time = clock::next_minute_boundary(now);
    Json(NextCandleResponse {
        next_candle_time,
        countdown: clock::countdown(next_candle_time, now),
    })
}
