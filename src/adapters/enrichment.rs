//! Enrichment stage: one ticker snapshot plus derived volatility, momentum
//! and a model-generated sentiment blurb.

use serde_json::Value;
use tracing::warn;

use super::{change_percent, num_field};
use crate::config::{Config, MOMENTUM_SAMPLE, TRADE_FETCH_LIMIT};
use crate::error::{AppError, Result};
use crate::llm;
use crate::types::{Asset, EnrichedQuote, Momentum};

const SENTIMENT_UNAVAILABLE: &str = "Market sentiment analysis unavailable";

/// Fetch ticker, 24h stats and recent trades for one pair concurrently and
/// layer derived metrics onto the ticker reading. Unlike the batch crypto
/// path, any of the three calls failing fails the whole request; only the
/// sentiment call degrades.
pub async fn analyze(client: &reqwest::Client, cfg: &Config, pair: &str) -> Result<EnrichedQuote> {
    let ticker_url = format!("{}/v1/pubticker/{pair}", cfg.gemini_api_url);
    let stats_url = format!("{}/v1/stats/{pair}", cfg.gemini_api_url);
    let trades_url = format!(
        "{}/v1/trades/{pair}?limit_trades={TRADE_FETCH_LIMIT}",
        cfg.gemini_api_url
    );

    let (ticker, _stats, trades) = tokio::try_join!(
        get_json(client, cfg, &ticker_url),
        get_json(client, cfg, &stats_url),
        get_json(client, cfg, &trades_url),
    )?;
    // The stats body only carries open_24h, whose market-cap derivation has
    // no defensible unit and is not reproduced.

    let price = num_field(&ticker, "last").unwrap_or(0.0);
    let change = num_field(&ticker, "change").unwrap_or(0.0);
    let day_high = num_field(&ticker, "high").unwrap_or(price);
    let day_low = num_field(&ticker, "low").unwrap_or(price);

    let base = pair.get(..3).unwrap_or(pair);
    let volume = ticker
        .get("volume")
        .and_then(|v| num_field(v, base))
        .unwrap_or(0.0);
    let volume_usd = ticker
        .get("volume")
        .and_then(|v| num_field(v, "USD"))
        .unwrap_or(0.0);

    let volatility = volatility(price, day_high, day_low);
    let trades_list = trades.as_array().map(Vec::as_slice).unwrap_or(&[]);
    let momentum = momentum(trades_list);

    let prompt = sentiment_prompt(pair, price, day_high, day_low, volume, base, volatility, momentum);
    let ai_sentiment = match llm::generate_content(client, cfg, &prompt, 0.3, 150).await {
        Ok(Some(text)) => text,
        Ok(None) => SENTIMENT_UNAVAILABLE.to_string(),
        Err(e) => {
            warn!("sentiment generation failed for {pair}: {e}");
            SENTIMENT_UNAVAILABLE.to_string()
        }
    };

    let (symbol, name) = match Asset::from_pair(pair) {
        Some(asset) => (asset.symbol().to_string(), asset.display_name().to_string()),
        None => (base.to_string(), base.to_string()),
    };

    Ok(EnrichedQuote {
        symbol,
        name,
        price,
        change,
        change_percent: change_percent(price, change),
        day_high,
        day_low,
        volume,
        volume_usd,
        volatility,
        momentum,
        ai_sentiment,
        support: day_low,
        resistance: day_high,
    })
}

/// Intraday high-low spread as a percentage of price, rounded to two
/// decimals. Zero or negative price yields 0.00.
pub fn volatility(price: f64, day_high: f64, day_low: f64) -> f64 {
    if price <= 0.0 {
        return 0.0;
    }
    ((day_high - day_low) / price * 100.0 * 100.0).round() / 100.0
}

/// Direction of the newest trades, which arrive newest-first. Fewer than two
/// samples is neutral. Equal first and last prices fall through to bearish —
/// a known quirk of the comparison, kept as-is.
pub fn momentum(trades: &[Value]) -> Momentum {
    let sample = &trades[..trades.len().min(MOMENTUM_SAMPLE)];
    if sample.len() < 2 {
        return Momentum::Neutral;
    }
    let newest = num_field(&sample[0], "price").unwrap_or(0.0);
    let oldest = num_field(&sample[sample.len() - 1], "price").unwrap_or(0.0);
    if newest > oldest {
        Momentum::Bullish
    } else {
        Momentum::Bearish
    }
}

#[allow(clippy::too_many_arguments)]
fn sentiment_prompt(
    pair: &str,
    price: f64,
    day_high: f64,
    day_low: f64,
    volume: f64,
    base: &str,
    volatility: f64,
    momentum: Momentum,
) -> String {
    format!(
        "Analyze the current market sentiment for {pair} based on:\n\
         - Current price: ${price}\n\
         - 24h high: ${day_high}\n\
         - 24h low: ${day_low}\n\
         - Volume: {volume} {base}\n\
         - Volatility: {volatility}%\n\
         - Recent trend: {momentum}\n\n\
         Provide a brief sentiment analysis (bullish/bearish/neutral) with reasoning in 2-3 sentences."
    )
}

async fn get_json(client: &reqwest::Client, cfg: &Config, url: &str) -> Result<Value> {
    let resp = client
        .get(url)
        .header("X-GEMINI-APIKEY", &cfg.gemini_api_key)
        .send()
        .await?;
    if !resp.status().is_success() {
        return Err(AppError::Upstream(format!(
            "{url} returned {}",
            resp.status()
        )));
    }
    Ok(resp.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn trades(prices: &[f64]) -> Vec<Value> {
        prices.iter().map(|p| json!({ "price": p.to_string() })).collect()
    }

    #[test]
    fn volatility_is_spread_over_price() {
        assert_eq!(volatility(100.0, 110.0, 90.0), 20.0);
        assert_eq!(volatility(200.0, 201.0, 200.0), 0.5);
    }

    #[test]
    fn zero_price_volatility_is_zero() {
        assert_eq!(volatility(0.0, 110.0, 90.0), 0.0);
    }

    #[test]
    fn rising_head_of_sample_is_bullish() {
        // Newest-first: 105 now vs 100 five trades ago.
        assert_eq!(momentum(&trades(&[105.0, 100.0])), Momentum::Bullish);
    }

    #[test]
    fn falling_head_of_sample_is_bearish() {
        assert_eq!(momentum(&trades(&[95.0, 100.0])), Momentum::Bearish);
    }

    #[test]
    fn fewer_than_two_trades_is_neutral() {
        assert_eq!(momentum(&trades(&[100.0])), Momentum::Neutral);
        assert_eq!(momentum(&[]), Momentum::Neutral);
    }

    #[test]
    fn equal_endpoints_resolve_bearish() {
        assert_eq!(momentum(&trades(&[100.0, 99.0, 100.0])), Momentum::Bearish);
    }

    #[test]
    fn sample_window_ignores_trades_beyond_the_fifth() {
        // Sixth trade (price 1.0) must not be the comparison endpoint.
        let list = trades(&[105.0, 104.0, 103.0, 102.0, 101.0, 1.0]);
        assert_eq!(momentum(&list), Momentum::Bullish);
    }

    #[test]
    fn prompt_embeds_derived_fields() {
        let prompt = sentiment_prompt(
            "BTCUSD", 60000.0, 61000.0, 59000.0, 123.4, "BTC", 3.33, Momentum::Bullish,
        );
        assert!(prompt.contains("BTCUSD"));
        assert!(prompt.contains("$60000"));
        assert!(prompt.contains("3.33%"));
        assert!(prompt.contains("bullish"));
    }
}
