//! Text-generation client shared by the chat route and the enrichment
//! sentiment call. Callers supply their own fallback text for the error and
//! empty-candidate cases.

use serde_json::{json, Value};

use crate::config::Config;
use crate::error::{AppError, Result};

/// Request a completion and return the first candidate's text, or None when
/// the model answers with no candidates.
pub async fn generate_content(
    client: &reqwest::Client,
    cfg: &Config,
    prompt: &str,
    temperature: f64,
    max_output_tokens: u32,
) -> Result<Option<String>> {
    let url = format!(
        "{}/v1beta/models/gemini-pro:generateContent?key={}",
        cfg.generative_api_url, cfg.gemini_api_key
    );
    let body = json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "temperature": temperature,
            "maxOutputTokens": max_output_tokens
        }
    });

    let resp = client.post(&url).json(&body).send().await?;
    let status = resp.status();
    let data: Value = resp.json().await?;

    if !status.is_success() {
        let msg = data
            .pointer("/error/message")
            .and_then(|m| m.as_str())
            .unwrap_or("model request failed")
            .to_string();
        return Err(AppError::Upstream(msg));
    }

    Ok(extract_text(&data))
}

/// First candidate text from a generateContent response body.
pub fn extract_text(v: &Value) -> Option<String> {
    v.pointer("/candidates/0/content/parts/0/text")
        .and_then(|t| t.as_str())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_candidate_text() {
        let body = json!({
            "candidates": [
                { "content": { "parts": [{ "text": "hello there" }] } },
                { "content": { "parts": [{ "text": "second" }] } }
            ]
        });
        assert_eq!(extract_text(&body), Some("hello there".to_string()));
    }

    #[test]
    fn empty_candidates_yield_none() {
        assert_eq!(extract_text(&json!({ "candidates": [] })), None);
        assert_eq!(extract_text(&json!({})), None);
    }
}
