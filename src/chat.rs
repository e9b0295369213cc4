//! Chat assistant: keyword triage short-circuits common questions to canned
//! replies; everything else goes to the model with the TrendMate persona.

use tracing::warn;

use crate::config::Config;
use crate::db::ChatLog;
use crate::llm;

/// Where a chat message routes before any model call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Triage {
    Stocks,
    Bitcoin,
    Weather,
    /// No keyword hit — forward to the model.
    Model,
}

/// Substring triage over the lowercased message. "whether" catches the
/// common misspelling.
pub fn triage(message: &str) -> Triage {
    let lower = message.to_lowercase();
    if lower.contains("stock") {
        Triage::Stocks
    } else if lower.contains("btc") || lower.contains("bitcoin") {
        Triage::Bitcoin
    } else if lower.contains("weather") || lower.contains("whether") {
        Triage::Weather
    } else {
        Triage::Model
    }
}

pub const STOCKS_RESPONSE: &str = "\u{1F4C8} Great question! The top trending stocks today include NVIDIA (NVDA), Tesla (TSLA), and Apple (AAPL). Check out the stock updates widget on your dashboard for live market data! What specific sector interests you most?";

pub const BITCOIN_RESPONSE: &str = "\u{1FA99} Bitcoin is currently trading around $117,000! The crypto market is showing strong momentum. Check out our Enhanced Crypto Analysis widget for detailed insights and sentiment analysis! Are you interested in other cryptocurrencies too?";

pub const WEATHER_RESPONSE: &str = "\u{2600}\u{FE0F} I can help you with the weather! Check out the weather widget on your dashboard - it shows your current location's forecast with temperature, humidity, and 3-day details! What city are you interested in?";

/// Model-path reply when the response body carries no candidates.
const EMPTY_MODEL_RESPONSE: &str = "I'm here to help you stay on top of all the latest trends! \u{1F496} What would you like to know?";

/// Friendly degradation for any model-path failure — chat never surfaces
/// errors to the caller.
pub const DEGRADED_RESPONSE: &str = "I'm having a tiny moment of confusion, but I'm still here for you! \u{1F496} Try asking me about the latest trends - I love sharing what's happening in the world!";

fn persona_prompt(message: &str) -> String {
    format!(
        "You are TrendMate, a lovable, emotionally intelligent AI assistant specializing in real-time trending information.\n\n\
         User message: \"{message}\"\n\n\
         Guidelines for your response:\n\
         - Be warm, caring, and emotionally responsive\n\
         - Use appropriate emojis (\u{1F4C8} for stocks, \u{1FA99} for crypto, \u{2600}\u{FE0F} for weather, \u{1F4F0} for news)\n\
         - Keep responses concise but informative (max 150 words)\n\
         - Be conversational and friendly\n\
         - Always end with a helpful follow-up question or suggestion\n\
         - Reference the dashboard widgets when relevant\n\n\
         Remember: You are the friendly face of real-time trending information!"
    )
}

/// Produce the reply for one chat message. Whether canned or model-generated,
/// the exchange is appended to the chat log when a user id is present; a
/// failed insert is logged and never surfaced.
pub async fn respond(
    client: &reqwest::Client,
    cfg: &Config,
    log: &ChatLog,
    message: &str,
    user_id: Option<&str>,
) -> String {
    let response = match triage(message) {
        Triage::Stocks => STOCKS_RESPONSE.to_string(),
        Triage::Bitcoin => BITCOIN_RESPONSE.to_string(),
        Triage::Weather => WEATHER_RESPONSE.to_string(),
        Triage::Model => {
            match llm::generate_content(client, cfg, &persona_prompt(message), 0.7, 200).await {
                Ok(Some(text)) => text,
                Ok(None) => EMPTY_MODEL_RESPONSE.to_string(),
                Err(e) => {
                    warn!("chat model call failed: {e}");
                    DEGRADED_RESPONSE.to_string()
                }
            }
        }
    };

    if let Some(user_id) = user_id {
        if let Err(e) = log.record(user_id, message, &response).await {
            warn!("failed to save chat history: {e}");
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitcoin_keywords_short_circuit() {
        assert_eq!(triage("what's bitcoin at"), Triage::Bitcoin);
        assert_eq!(triage("BTC to the moon?"), Triage::Bitcoin);
    }

    #[test]
    fn stock_keyword_short_circuits() {
        assert_eq!(triage("any trending stocks?"), Triage::Stocks);
        assert_eq!(triage("STOCK market today"), Triage::Stocks);
    }

    #[test]
    fn weather_and_its_misspelling_short_circuit() {
        assert_eq!(triage("how's the weather"), Triage::Weather);
        assert_eq!(triage("whether it rains or not"), Triage::Weather);
    }

    #[test]
    fn unmatched_messages_route_to_the_model() {
        assert_eq!(triage("tell me a joke"), Triage::Model);
        assert_eq!(triage(""), Triage::Model);
    }

    #[test]
    fn stock_wins_over_later_keywords() {
        // First matching branch takes precedence.
        assert_eq!(triage("stocks or bitcoin?"), Triage::Stocks);
    }

    #[test]
    fn persona_prompt_embeds_the_message() {
        let prompt = persona_prompt("tell me a joke");
        assert!(prompt.contains("\"tell me a joke\""));
        assert!(prompt.contains("TrendMate"));
    }
}
