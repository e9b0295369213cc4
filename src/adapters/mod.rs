//! Provider adapters: fetch, normalize, return. No adapter keeps state
//! between requests, and none depends on another's output.

pub mod crypto;
pub mod enrichment;
pub mod news;
pub mod stocks;
pub mod weather;

use serde_json::Value;

/// Percent move over the prior baseline (price − change), fixed to two
/// decimals. A zero baseline yields "0.00" rather than a division by zero.
pub fn change_percent(price: f64, change: f64) -> String {
    let baseline = price - change;
    if baseline == 0.0 {
        return "0.00".to_string();
    }
    format!("{:.2}", change / baseline * 100.0)
}

/// Numeric field that providers serve as either a JSON number or a numeric
/// string.
pub fn num_field(v: &Value, key: &str) -> Option<f64> {
    v.get(key)
        .and_then(|x| x.as_f64().or_else(|| x.as_str().and_then(|s| s.parse().ok())))
}
