//! Headlines adapter: one top-headlines call, first three articles kept.

use serde_json::Value;

use crate::config::{Config, NEWS_HEADLINES};
use crate::error::{AppError, Result};
use crate::types::Article;

/// Fetch US top headlines. A non-success response surfaces the provider's
/// message as the failure.
pub async fn fetch_news(client: &reqwest::Client, cfg: &Config) -> Result<Vec<Article>> {
    let url = format!(
        "{}/v2/top-headlines?country=us&pageSize=10&apiKey={}",
        cfg.news_api_url, cfg.news_api_key
    );
    let resp = client.get(&url).send().await?;
    let status = resp.status();
    let body: Value = resp.json().await?;

    if !status.is_success() {
        let msg = body
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("failed to fetch news")
            .to_string();
        return Err(AppError::Upstream(msg));
    }

    Ok(parse_articles(&body))
}

/// Headline records from the provider body. A missing description falls back
/// to the title, a missing source name to "Unknown".
pub fn parse_articles(v: &Value) -> Vec<Article> {
    let Some(articles) = v.get("articles").and_then(|a| a.as_array()) else {
        return Vec::new();
    };

    articles
        .iter()
        .take(NEWS_HEADLINES)
        .map(|a| {
            let title = a
                .get("title")
                .and_then(|t| t.as_str())
                .unwrap_or("")
                .to_string();
            let summary = a
                .get("description")
                .and_then(|d| d.as_str())
                .filter(|s| !s.is_empty())
                .unwrap_or(&title)
                .to_string();
            Article {
                summary,
                source: a
                    .pointer("/source/name")
                    .and_then(|s| s.as_str())
                    .unwrap_or("Unknown")
                    .to_string(),
                url: a.get("url").and_then(|u| u.as_str()).unwrap_or("").to_string(),
                published_at: a
                    .get("publishedAt")
                    .and_then(|p| p.as_str())
                    .unwrap_or("")
                    .to_string(),
                title,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_first_three_articles() {
        let body = json!({
            "articles": (0..10).map(|i| json!({
                "title": format!("headline {i}"),
                "description": format!("summary {i}"),
                "source": { "name": "Wire" },
                "url": "https://example.com",
                "publishedAt": "2026-08-30T10:00:00Z"
            })).collect::<Vec<_>>()
        });
        let articles = parse_articles(&body);
        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].title, "headline 0");
        assert_eq!(articles[2].summary, "summary 2");
    }

    #[test]
    fn missing_fields_fall_back() {
        let body = json!({
            "articles": [{ "title": "only a title" }]
        });
        let articles = parse_articles(&body);
        assert_eq!(articles[0].summary, "only a title");
        assert_eq!(articles[0].source, "Unknown");
        assert_eq!(articles[0].url, "");
    }

    #[test]
    fn body_without_articles_is_empty() {
        assert!(parse_articles(&json!({})).is_empty());
    }
}
