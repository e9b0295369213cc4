use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Asset catalog
// ---------------------------------------------------------------------------

/// The fixed asset set served by the crypto widget. An enum rather than a
/// lookup map so an unmapped trading pair is a visible concern at the match
/// sites instead of a missing entry at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Asset {
    Btc,
    Eth,
    Ada,
    Sol,
}

impl Asset {
    pub const ALL: [Asset; 4] = [Asset::Btc, Asset::Eth, Asset::Ada, Asset::Sol];

    /// Resolve an exchange trading-pair code to its canonical asset.
    pub fn from_pair(pair: &str) -> Option<Self> {
        match pair {
            "BTCUSD" => Some(Asset::Btc),
            "ETHUSD" => Some(Asset::Eth),
            "ADAUSD" => Some(Asset::Ada),
            "SOLUSD" => Some(Asset::Sol),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Asset::Btc => "BTC",
            Asset::Eth => "ETH",
            Asset::Ada => "ADA",
            Asset::Sol => "SOL",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Asset::Btc => "Bitcoin",
            Asset::Eth => "Ethereum",
            Asset::Ada => "Cardano",
            Asset::Sol => "Solana",
        }
    }

    /// Asset id on the fallback price aggregator.
    pub fn coingecko_id(self) -> &'static str {
        match self {
            Asset::Btc => "bitcoin",
            Asset::Eth => "ethereum",
            Asset::Ada => "cardano",
            Asset::Sol => "solana",
        }
    }
}

/// Display names for the stock widget's tickers. Unmapped symbols fall back
/// to the raw symbol at the call site.
pub fn company_name(symbol: &str) -> Option<&'static str> {
    match symbol {
        "AAPL" => Some("Apple"),
        "TSLA" => Some("Tesla"),
        "NVDA" => Some("NVIDIA"),
        "MSFT" => Some("Microsoft"),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Quotes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerQuote {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    /// Percent move over the prior baseline (price − change), fixed to two
    /// decimals. "0.00" when the baseline is zero.
    pub change_percent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockQuote {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
}

/// One ticker reading with derived metrics layered on top.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedQuote {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: String,
    pub day_high: f64,
    pub day_low: f64,
    /// 24h volume in the base asset.
    pub volume: f64,
    #[serde(rename = "volumeUSD")]
    pub volume_usd: f64,
    /// Intraday high-low spread as a percentage of price, two decimals.
    pub volatility: f64,
    pub momentum: Momentum,
    pub ai_sentiment: String,
    /// Mirrors day_low — no separate technical calculation.
    pub support: f64,
    /// Mirrors day_high.
    pub resistance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Momentum {
    Bullish,
    Bearish,
    Neutral,
}

impl std::fmt::Display for Momentum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Momentum::Bullish => "bullish",
            Momentum::Bearish => "bearish",
            Momentum::Neutral => "neutral",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// "City, Country"
    pub location: String,
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    /// °F, rounded.
    pub temperature: i64,
    /// Title-cased provider description.
    pub condition: String,
    /// Percent.
    pub humidity: i64,
    /// mph, rounded.
    pub wind_speed: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Positional label ("Tomorrow", "Day After", "In 3 Days").
    pub day: String,
    pub high: i64,
    pub low: i64,
    pub icon: ForecastIcon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastIcon {
    Sun,
    Rain,
    Cloud,
}

// ---------------------------------------------------------------------------
// News
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub summary: String,
    pub source: String,
    pub url: String,
    pub published_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_codes_resolve_to_assets() {
        assert_eq!(Asset::from_pair("BTCUSD"), Some(Asset::Btc));
        assert_eq!(Asset::from_pair("SOLUSD"), Some(Asset::Sol));
        assert_eq!(Asset::from_pair("DOGEUSD"), None);
    }

    #[test]
    fn asset_catalog_is_consistent() {
        for asset in Asset::ALL {
            assert_eq!(asset.symbol().len(), 3);
            assert!(!asset.display_name().is_empty());
            assert!(!asset.coingecko_id().is_empty());
        }
    }

    #[test]
    fn company_names_map_known_tickers() {
        assert_eq!(company_name("AAPL"), Some("Apple"));
        assert_eq!(company_name("NVDA"), Some("NVIDIA"));
        assert_eq!(company_name("GME"), None);
    }
}
