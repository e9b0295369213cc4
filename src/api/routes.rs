use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::adapters::{crypto, enrichment, news, stocks, weather};
use crate::chat;
use crate::config::{Config, DEFAULT_ANALYSIS_PAIR, DEFAULT_LAT, DEFAULT_LON};
use crate::db::ChatLog;
use crate::error::AppError;
use crate::types::{Article, EnrichedQuote, StockQuote, TickerQuote, WeatherSnapshot};

#[derive(Clone)]
pub struct ApiState {
    pub cfg: Arc<Config>,
    pub http: reqwest::Client,
    pub chat_log: ChatLog,
}

/// Market-data routes propagate upstream failure as 500 + `{"error"}`; /chat
/// degrades to canned text and always answers 200. The permissive CORS layer
/// answers preflight for every route.
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/crypto", get(get_crypto))
        .route("/crypto/analysis", post(post_crypto_analysis))
        .route("/stocks", get(get_stocks))
        .route("/weather", get(get_weather))
        .route("/news", get(get_news))
        .route("/chat", post(post_chat))
        .route("/health", get(get_health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct WeatherQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

#[derive(Deserialize)]
pub struct AnalysisRequest {
    pub symbol: Option<String>,
}

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct CryptoResponse {
    pub crypto: Vec<TickerQuote>,
}

#[derive(Serialize)]
pub struct StocksResponse {
    pub stocks: Vec<StockQuote>,
}

#[derive(Serialize)]
pub struct WeatherResponse {
    pub weather: WeatherSnapshot,
}

#[derive(Serialize)]
pub struct NewsResponse {
    pub articles: Vec<Article>,
}

#[derive(Serialize)]
pub struct AnalysisResponse {
    pub analysis: EnrichedQuote,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn get_crypto(State(state): State<ApiState>) -> Result<Json<CryptoResponse>, AppError> {
    let crypto = crypto::fetch_crypto(&state.http, &state.cfg).await?;
    Ok(Json(CryptoResponse { crypto }))
}

async fn post_crypto_analysis(
    State(state): State<ApiState>,
    Json(req): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let pair = req
        .symbol
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_ANALYSIS_PAIR.to_string());
    let analysis = enrichment::analyze(&state.http, &state.cfg, &pair).await?;
    Ok(Json(AnalysisResponse { analysis }))
}

async fn get_stocks(State(state): State<ApiState>) -> Result<Json<StocksResponse>, AppError> {
    let stocks = stocks::fetch_stocks(&state.http, &state.cfg).await?;
    Ok(Json(StocksResponse { stocks }))
}

async fn get_weather(
    State(state): State<ApiState>,
    Query(q): Query<WeatherQuery>,
) -> Result<Json<WeatherResponse>, AppError> {
    // Coordinate resolution is the caller's job; absent coordinates fall
    // back to the fixed default pair.
    let lat = q.lat.unwrap_or_else(|| DEFAULT_LAT.to_string());
    let lon = q.lon.unwrap_or_else(|| DEFAULT_LON.to_string());
    let weather = weather::fetch_weather(&state.http, &state.cfg, &lat, &lon).await?;
    Ok(Json(WeatherResponse { weather }))
}

async fn get_news(State(state): State<ApiState>) -> Result<Json<NewsResponse>, AppError> {
    let articles = news::fetch_news(&state.http, &state.cfg).await?;
    Ok(Json(NewsResponse { articles }))
}

async fn post_chat(State(state): State<ApiState>, Json(req): Json<ChatRequest>) -> Json<ChatResponse> {
    let response = chat::respond(
        &state.http,
        &state.cfg,
        &state.chat_log,
        &req.message,
        req.user_id.as_deref(),
    )
    .await;
    Json(ChatResponse { response })
}

async fn get_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
