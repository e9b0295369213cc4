//! Stock quote adapter. Symbols fetch independently; a failed or quote-less
//! response degrades to a zero-valued record rather than aborting the batch.

use futures_util::future::join_all;
use serde_json::Value;
use tracing::warn;

use super::num_field;
use crate::config::{Config, STOCK_SYMBOLS};
use crate::error::Result;
use crate::types::{company_name, StockQuote};

/// Fetch the fixed ticker set from the quote provider, one call per symbol.
pub async fn fetch_stocks(client: &reqwest::Client, cfg: &Config) -> Result<Vec<StockQuote>> {
    let quotes = join_all(STOCK_SYMBOLS.iter().map(|s| fetch_symbol(client, cfg, s))).await;
    Ok(quotes)
}

async fn fetch_symbol(client: &reqwest::Client, cfg: &Config, symbol: &str) -> StockQuote {
    let url = format!(
        "{}/query?function=GLOBAL_QUOTE&symbol={symbol}&apikey={}",
        cfg.alpha_vantage_api_url, cfg.alpha_vantage_api_key
    );
    let body: Value = match client.get(&url).send().await {
        Ok(r) => match r.json().await {
            Ok(v) => v,
            Err(e) => {
                warn!("stock quote parse failed for {symbol}: {e}");
                return zero_quote(symbol);
            }
        },
        Err(e) => {
            warn!("stock fetch failed for {symbol}: {e}");
            return zero_quote(symbol);
        }
    };
    parse_quote(symbol, &body)
}

/// Extract price/change/percent from a GLOBAL_QUOTE body. A body without the
/// quote object degrades to the zero record. The percent field arrives with
/// a trailing "%".
pub fn parse_quote(symbol: &str, v: &Value) -> StockQuote {
    let Some(quote) = v.get("Global Quote") else {
        return zero_quote(symbol);
    };

    let price = num_field(quote, "05. price").unwrap_or(0.0);
    let change = num_field(quote, "09. change").unwrap_or(0.0);
    let change_percent = quote
        .get("10. change percent")
        .and_then(|p| p.as_str())
        .and_then(|s| s.trim_end_matches('%').parse().ok())
        .unwrap_or(0.0);

    StockQuote {
        symbol: symbol.to_string(),
        name: display_name(symbol),
        price,
        change,
        change_percent,
    }
}

/// Zero-valued record used when the provider has nothing for a symbol.
pub fn zero_quote(symbol: &str) -> StockQuote {
    StockQuote {
        symbol: symbol.to_string(),
        name: display_name(symbol),
        price: 0.0,
        change: 0.0,
        change_percent: 0.0,
    }
}

fn display_name(symbol: &str) -> String {
    company_name(symbol).unwrap_or(symbol).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_quote_object_degrades_to_zero_record() {
        let quote = parse_quote("AAPL", &json!({ "Note": "rate limited" }));
        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.name, "Apple");
        assert_eq!(quote.price, 0.0);
        assert_eq!(quote.change, 0.0);
        assert_eq!(quote.change_percent, 0.0);
    }

    #[test]
    fn parses_full_quote_and_strips_percent_sign() {
        let body = json!({
            "Global Quote": {
                "01. symbol": "TSLA",
                "05. price": "251.4400",
                "09. change": "-3.1200",
                "10. change percent": "-1.2255%"
            }
        });
        let quote = parse_quote("TSLA", &body);
        assert_eq!(quote.name, "Tesla");
        assert_eq!(quote.price, 251.44);
        assert_eq!(quote.change, -3.12);
        assert_eq!(quote.change_percent, -1.2255);
    }

    #[test]
    fn unmapped_symbol_uses_raw_symbol_as_name() {
        let quote = zero_quote("GME");
        assert_eq!(quote.name, "GME");
    }

    #[test]
    fn empty_quote_object_yields_zero_fields() {
        let quote = parse_quote("MSFT", &json!({ "Global Quote": {} }));
        assert_eq!(quote.name, "Microsoft");
        assert_eq!(quote.price, 0.0);
    }
}
