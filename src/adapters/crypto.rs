//! Crypto quote adapter: primary exchange tickers with an aggregator
//! fallback when the primary yields nothing at all.

use futures_util::future::join_all;
use serde_json::Value;
use tracing::{info, warn};

use super::{change_percent, num_field};
use crate::config::{Config, CRYPTO_PAIRS};
use crate::error::Result;
use crate::types::{Asset, TickerQuote};

/// Fetch the fixed pair set from the primary exchange. Pairs fetch
/// concurrently and fail independently; only a fully empty batch triggers
/// the fallback, so one response never mixes sources for an asset.
pub async fn fetch_crypto(client: &reqwest::Client, cfg: &Config) -> Result<Vec<TickerQuote>> {
    let results = join_all(CRYPTO_PAIRS.iter().map(|pair| fetch_pair(client, cfg, pair))).await;
    let valid: Vec<TickerQuote> = results.into_iter().flatten().collect();

    if valid.is_empty() {
        info!("primary crypto source yielded no quotes, falling back to aggregator");
        return fetch_fallback(client, cfg).await;
    }
    Ok(valid)
}

async fn fetch_pair(client: &reqwest::Client, cfg: &Config, pair: &str) -> Option<TickerQuote> {
    let url = format!("{}/v1/pubticker/{pair}", cfg.gemini_api_url);
    let resp = match client
        .get(&url)
        .header("X-GEMINI-APIKEY", &cfg.gemini_api_key)
        .send()
        .await
    {
        Ok(r) => r,
        Err(e) => {
            warn!("crypto fetch failed for {pair}: {e}");
            return None;
        }
    };
    if !resp.status().is_success() {
        warn!("crypto fetch for {pair} returned {}", resp.status());
        return None;
    }
    let body: Value = resp.json().await.ok()?;
    parse_ticker(pair, &body)
}

/// Parse one primary ticker body into a quote. None when the pair is not in
/// the asset catalog or the price fields are missing/non-numeric.
pub fn parse_ticker(pair: &str, v: &Value) -> Option<TickerQuote> {
    let asset = Asset::from_pair(pair)?;
    let price = num_field(v, "last")?;
    let change = num_field(v, "change")?;
    Some(TickerQuote {
        symbol: asset.symbol().to_string(),
        name: asset.display_name().to_string(),
        price,
        change,
        change_percent: change_percent(price, change),
    })
}

async fn fetch_fallback(client: &reqwest::Client, cfg: &Config) -> Result<Vec<TickerQuote>> {
    let ids: Vec<&str> = Asset::ALL.iter().map(|a| a.coingecko_id()).collect();
    let url = format!(
        "{}/api/v3/simple/price?ids={}&vs_currencies=usd&include_24hr_change=true",
        cfg.coingecko_api_url,
        ids.join(",")
    );
    let body: Value = client.get(&url).send().await?.json().await?;
    Ok(parse_fallback(&body))
}

/// Synthesize the full asset set from the aggregator body, defaulting any
/// missing field to 0. The 24h change percent stands in for both change
/// fields — the aggregator has no absolute-change figure.
pub fn parse_fallback(v: &Value) -> Vec<TickerQuote> {
    Asset::ALL
        .iter()
        .map(|asset| {
            let entry = v.get(asset.coingecko_id());
            let price = entry
                .and_then(|e| e.get("usd"))
                .and_then(|p| p.as_f64())
                .unwrap_or(0.0);
            let change_24h = entry
                .and_then(|e| e.get("usd_24h_change"))
                .and_then(|c| c.as_f64())
                .unwrap_or(0.0);
            TickerQuote {
                symbol: asset.symbol().to_string(),
                name: asset.display_name().to_string(),
                price,
                change: change_24h,
                change_percent: format!("{change_24h:.2}"),
            }
        })
        .collect()
}
