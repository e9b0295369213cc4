use crate::error::{AppError, Result};

pub const GEMINI_API_URL: &str = "https://api.gemini.com";
pub const COINGECKO_API_URL: &str = "https://api.coingecko.com";
pub const ALPHA_VANTAGE_API_URL: &str = "https://www.alphavantage.co";
pub const OPENWEATHER_API_URL: &str = "https://api.openweathermap.org";
pub const NEWS_API_URL: &str = "https://newsapi.org";
pub const GENERATIVE_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Trading pairs polled from the primary crypto source.
pub const CRYPTO_PAIRS: &[&str] = &["BTCUSD", "ETHUSD", "ADAUSD", "SOLUSD"];

/// Tickers polled from the stock quote provider.
pub const STOCK_SYMBOLS: &[&str] = &["AAPL", "TSLA", "NVDA", "MSFT"];

/// Pair analyzed when the caller names none.
pub const DEFAULT_ANALYSIS_PAIR: &str = "BTCUSD";

/// Default coordinates (San Francisco) when the caller sends none.
pub const DEFAULT_LAT: &str = "37.7749";
pub const DEFAULT_LON: &str = "-122.4194";

/// Outbound HTTP timeout (seconds).
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Trades requested per enrichment call.
pub const TRADE_FETCH_LIMIT: usize = 10;

/// Newest trades sampled for the momentum direction.
pub const MOMENTUM_SAMPLE: usize = 5;

/// The forecast feed delivers 3-hourly samples, so every 8th entry is one
/// day apart.
pub const FORECAST_SAMPLES_PER_DAY: usize = 8;

/// Days kept by the forecast reduction.
pub const FORECAST_DAYS: usize = 3;

/// Headlines kept from the news provider.
pub const NEWS_HEADLINES: usize = 3;

#[derive(Debug, Clone)]
pub struct Config {
    /// Exchange + generative API key (GEMINI_API_KEY).
    pub gemini_api_key: String,
    /// Stock quote provider key (ALPHA_VANTAGE_API_KEY).
    pub alpha_vantage_api_key: String,
    /// Weather provider key (OPENWEATHER_API_KEY).
    pub openweather_api_key: String,
    /// Headlines provider key (NEWS_API_KEY).
    pub news_api_key: String,
    pub gemini_api_url: String,
    pub coingecko_api_url: String,
    pub alpha_vantage_api_url: String,
    pub openweather_api_url: String,
    pub news_api_url: String,
    pub generative_api_url: String,
    pub log_level: String,
    pub db_path: String,
    pub api_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            gemini_api_key: require("GEMINI_API_KEY")?,
            alpha_vantage_api_key: require("ALPHA_VANTAGE_API_KEY")?,
            openweather_api_key: require("OPENWEATHER_API_KEY")?,
            news_api_key: require("NEWS_API_KEY")?,
            gemini_api_url: std::env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| GEMINI_API_URL.to_string()),
            coingecko_api_url: std::env::var("COINGECKO_API_URL")
                .unwrap_or_else(|_| COINGECKO_API_URL.to_string()),
            alpha_vantage_api_url: std::env::var("ALPHA_VANTAGE_API_URL")
                .unwrap_or_else(|_| ALPHA_VANTAGE_API_URL.to_string()),
            openweather_api_url: std::env::var("OPENWEATHER_API_URL")
                .unwrap_or_else(|_| OPENWEATHER_API_URL.to_string()),
            news_api_url: std::env::var("NEWS_API_URL")
                .unwrap_or_else(|_| NEWS_API_URL.to_string()),
            generative_api_url: std::env::var("GENERATIVE_API_URL")
                .unwrap_or_else(|_| GENERATIVE_API_URL.to_string()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            db_path: std::env::var("DB_PATH").unwrap_or_else(|_| "trendmate.db".to_string()),
            api_port: std::env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .map_err(|_| AppError::Config("API_PORT must be a valid port number".to_string()))?,
        })
    }
}

/// Provider keys have no usable default — a missing one is a startup failure.
fn require(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| AppError::Config(format!("{name} must be set")))
}
