//! Weather adapter: current conditions plus a 3-day reduction of the
//! provider's 3-hourly forecast series.

use serde_json::Value;

use crate::config::{Config, FORECAST_DAYS, FORECAST_SAMPLES_PER_DAY};
use crate::error::{AppError, Result};
use crate::types::{CurrentConditions, ForecastEntry, ForecastIcon, WeatherSnapshot};

/// Positional labels for the reduced daily forecast.
const DAY_LABELS: [&str; FORECAST_DAYS] = ["Tomorrow", "Day After", "In 3 Days"];

/// Fetch current conditions and the forecast series for one coordinate pair.
/// Unlike the batch adapters, either call failing fails the whole operation.
pub async fn fetch_weather(
    client: &reqwest::Client,
    cfg: &Config,
    lat: &str,
    lon: &str,
) -> Result<WeatherSnapshot> {
    let current_url = format!(
        "{}/data/2.5/weather?lat={lat}&lon={lon}&appid={}&units=imperial",
        cfg.openweather_api_url, cfg.openweather_api_key
    );
    let forecast_url = format!(
        "{}/data/2.5/forecast?lat={lat}&lon={lon}&appid={}&units=imperial",
        cfg.openweather_api_url, cfg.openweather_api_key
    );

    let (current_resp, forecast_resp) = tokio::try_join!(
        client.get(&current_url).send(),
        client.get(&forecast_url).send(),
    )?;
    if !current_resp.status().is_success() || !forecast_resp.status().is_success() {
        return Err(AppError::Upstream(format!(
            "weather provider returned {} / {}",
            current_resp.status(),
            forecast_resp.status()
        )));
    }

    let (current, forecast): (Value, Value) =
        tokio::try_join!(current_resp.json(), forecast_resp.json())?;

    Ok(build_snapshot(&current, &forecast))
}

/// Assemble the snapshot from the two provider bodies.
pub fn build_snapshot(current: &Value, forecast: &Value) -> WeatherSnapshot {
    let city = current.get("name").and_then(|n| n.as_str()).unwrap_or("");
    let country = current
        .pointer("/sys/country")
        .and_then(|c| c.as_str())
        .unwrap_or("");
    let description = current
        .pointer("/weather/0/description")
        .and_then(|d| d.as_str())
        .unwrap_or("");
    let list = forecast
        .get("list")
        .and_then(|l| l.as_array())
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    WeatherSnapshot {
        location: format!("{city}, {country}"),
        current: CurrentConditions {
            temperature: round_i64(current.pointer("/main/temp")),
            condition: title_case(description),
            humidity: current
                .pointer("/main/humidity")
                .and_then(Value::as_i64)
                .unwrap_or(0),
            wind_speed: round_i64(current.pointer("/wind/speed")),
        },
        forecast: daily_forecast(list),
    }
}

/// Reduce the 3-hourly series to one entry per day: every 8th sample with
/// the first (today) skipped, capped at three days out.
pub fn daily_forecast(list: &[Value]) -> Vec<ForecastEntry> {
    list.iter()
        .step_by(FORECAST_SAMPLES_PER_DAY)
        .skip(1)
        .take(FORECAST_DAYS)
        .enumerate()
        .map(|(i, sample)| ForecastEntry {
            day: DAY_LABELS.get(i).copied().unwrap_or("Later").to_string(),
            high: round_i64(sample.pointer("/main/temp_max")),
            low: round_i64(sample.pointer("/main/temp_min")),
            icon: icon_for(
                sample
                    .pointer("/weather/0/main")
                    .and_then(|m| m.as_str())
                    .unwrap_or(""),
            ),
        })
        .collect()
}

/// Provider condition category → widget icon.
pub fn icon_for(weather_main: &str) -> ForecastIcon {
    match weather_main.to_lowercase().as_str() {
        "clear" => ForecastIcon::Sun,
        "rain" | "drizzle" => ForecastIcon::Rain,
        _ => ForecastIcon::Cloud,
    }
}

/// Capitalize the first letter of every space-separated word.
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn round_i64(v: Option<&Value>) -> i64 {
    v.and_then(Value::as_f64).unwrap_or(0.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn forecast_list(len: usize) -> Vec<Value> {
        (0..len)
            .map(|i| {
                json!({
                    "main": { "temp_max": i as f64, "temp_min": i as f64 - 5.0 },
                    "weather": [{ "main": "Clear" }]
                })
            })
            .collect()
    }

    #[test]
    fn forty_entry_series_reduces_to_indices_8_16_24() {
        let list = forecast_list(40);
        let forecast = daily_forecast(&list);
        assert_eq!(forecast.len(), 3);
        assert_eq!(forecast[0].high, 8);
        assert_eq!(forecast[1].high, 16);
        assert_eq!(forecast[2].high, 24);
        assert_eq!(forecast[0].day, "Tomorrow");
        assert_eq!(forecast[1].day, "Day After");
        assert_eq!(forecast[2].day, "In 3 Days");
    }

    #[test]
    fn short_series_yields_fewer_days() {
        let forecast = daily_forecast(&forecast_list(20));
        assert_eq!(forecast.len(), 2);
    }

    #[test]
    fn icon_mapping_covers_all_categories() {
        assert_eq!(icon_for("Clear"), ForecastIcon::Sun);
        assert_eq!(icon_for("Rain"), ForecastIcon::Rain);
        assert_eq!(icon_for("Drizzle"), ForecastIcon::Rain);
        assert_eq!(icon_for("Clouds"), ForecastIcon::Cloud);
        assert_eq!(icon_for("Thunderstorm"), ForecastIcon::Cloud);
        assert_eq!(icon_for(""), ForecastIcon::Cloud);
    }

    #[test]
    fn title_cases_every_word() {
        assert_eq!(title_case("scattered clouds"), "Scattered Clouds");
        assert_eq!(title_case("light rain"), "Light Rain");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn snapshot_normalizes_current_conditions() {
        let current = json!({
            "name": "San Francisco",
            "sys": { "country": "US" },
            "weather": [{ "main": "Clouds", "description": "broken clouds" }],
            "main": { "temp": 61.7, "humidity": 78 },
            "wind": { "speed": 12.3 }
        });
        let forecast = json!({ "list": forecast_list(40) });

        let snapshot = build_snapshot(&current, &forecast);
        assert_eq!(snapshot.location, "San Francisco, US");
        assert_eq!(snapshot.current.temperature, 62);
        assert_eq!(snapshot.current.condition, "Broken Clouds");
        assert_eq!(snapshot.current.humidity, 78);
        assert_eq!(snapshot.current.wind_speed, 12);
        assert_eq!(snapshot.forecast.len(), 3);
    }
}
