use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::model::{CurrentWeather, Forecast, ForecastDay, HistoryEntry, WeatherHistory};
use crate::WeatherError;

use super::WeatherApiService;

const BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Number of days requested from the daily-forecast endpoint.
const FORECAST_DAYS: u8 = 7;

#[derive(Debug, Clone)]
pub struct OpenWeatherService {
    api_key: String,
    http: Client,
}

impl OpenWeatherService {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WeatherError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { api_key, http })
    }

    async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<String, WeatherError> {
        let url = format!("{BASE_URL}/{path}");

        let res = self
            .http
            .get(&url)
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .query(query)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Api { status, body: truncate_body(&body) });
        }

        Ok(body)
    }

    async fn fetch_current(&self, city: &str) -> Result<CurrentWeather, WeatherError> {
        let body = self.get_json("weather", &[("q", city)]).await?;
        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;
        Ok(map_current(parsed))
    }

    async fn fetch_forecast(&self, city: &str) -> Result<Forecast, WeatherError> {
        let days = FORECAST_DAYS.to_string();
        let body = self.get_json("forecast/daily", &[("q", city), ("cnt", &days)]).await?;
        let parsed: OwForecastResponse = serde_json::from_str(&body)?;
        Ok(map_forecast(parsed))
    }
}

#[async_trait]
impl WeatherApiService for OpenWeatherService {
    async fn current_and_forecast(
        &self,
        city: &str,
    ) -> Result<(CurrentWeather, Forecast), WeatherError> {
        // Both target the same screen, so fetch them together.
        tokio::try_join!(self.fetch_current(city), self.fetch_forecast(city))
    }

    async fn history(&self, city: &str) -> Result<WeatherHistory, WeatherError> {
        let body = self.get_json("history/city", &[("q", city), ("type", "hour")]).await?;
        let parsed: OwHistoryResponse = serde_json::from_str(&body)?;
        Ok(map_history(city, parsed))
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwDailyTemp {
    day: f64,
}

#[derive(Debug, Deserialize)]
struct OwDailyEntry {
    dt: i64,
    temp: OwDailyTemp,
    speed: f64,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwDailyEntry>,
}

#[derive(Debug, Deserialize)]
struct OwHistoryEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwHistoryResponse {
    list: Vec<OwHistoryEntry>,
}

fn map_current(parsed: OwCurrentResponse) -> CurrentWeather {
    let observed_at = unix_to_utc(parsed.dt).unwrap_or_else(Utc::now);
    let (condition, icon) = condition_of(&parsed.weather);

    CurrentWeather {
        city: parsed.name,
        condition,
        icon,
        temperature_c: parsed.main.temp,
        humidity_pct: parsed.main.humidity,
        wind_speed_mps: parsed.wind.speed,
        observed_at,
    }
}

fn map_forecast(parsed: OwForecastResponse) -> Forecast {
    let city = format!("{}, {}", parsed.city.name, parsed.city.country);

    let days = parsed
        .list
        .into_iter()
        .map(|entry| {
            let date = unix_to_utc(entry.dt).unwrap_or_else(Utc::now);
            let (condition, icon) = condition_of(&entry.weather);
            ForecastDay {
                date,
                condition,
                icon,
                day_temp_c: entry.temp.day,
                wind_speed_mps: entry.speed,
            }
        })
        .collect();

    Forecast { city, days }
}

fn map_history(city: &str, parsed: OwHistoryResponse) -> WeatherHistory {
    let entries = parsed
        .list
        .into_iter()
        .map(|entry| {
            let observed_at = unix_to_utc(entry.dt).unwrap_or_else(Utc::now);
            let (condition, icon) = condition_of(&entry.weather);
            HistoryEntry { observed_at, condition, icon, temperature_c: entry.main.temp }
        })
        .collect();

    WeatherHistory { city: city.to_owned(), entries }
}

fn condition_of(weather: &[OwWeather]) -> (String, String) {
    weather
        .first()
        .map(|w| (w.description.clone(), w.icon.clone()))
        .unwrap_or_else(|| ("Unknown".to_string(), String::new()))
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}

// Error bodies come from the remote service, so the cut must land on a
// char boundary.
fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURRENT_JSON: &str = r#"{
        "name": "London",
        "dt": 1714500000,
        "main": { "temp": 12.5, "humidity": 71 },
        "weather": [ { "description": "light rain", "icon": "10d" } ],
        "wind": { "speed": 4.2 }
    }"#;

    const FORECAST_JSON: &str = r#"{
        "city": { "name": "London", "country": "GB" },
        "list": [
            {
                "dt": 1714521600,
                "temp": { "day": 14.0 },
                "speed": 3.1,
                "weather": [ { "description": "scattered clouds", "icon": "03d" } ]
            },
            {
                "dt": 1714608000,
                "temp": { "day": 16.5 },
                "speed": 2.4,
                "weather": [ { "description": "clear sky", "icon": "01d" } ]
            }
        ]
    }"#;

    const HISTORY_JSON: &str = r#"{
        "list": [
            {
                "dt": 1714410000,
                "main": { "temp": 9.8, "humidity": 80 },
                "weather": [ { "description": "overcast clouds", "icon": "04n" } ]
            }
        ]
    }"#;

    #[test]
    fn current_payload_maps_to_domain() {
        let parsed: OwCurrentResponse = serde_json::from_str(CURRENT_JSON).expect("valid JSON");
        let current = map_current(parsed);

        assert_eq!(current.city, "London");
        assert_eq!(current.condition, "light rain");
        assert_eq!(current.icon, "10d");
        assert_eq!(current.humidity_pct, 71);
        assert_eq!(current.observed_at.timestamp(), 1714500000);
    }

    #[test]
    fn forecast_payload_maps_days_in_order() {
        let parsed: OwForecastResponse = serde_json::from_str(FORECAST_JSON).expect("valid JSON");
        let forecast = map_forecast(parsed);

        assert_eq!(forecast.city, "London, GB");
        assert_eq!(forecast.days.len(), 2);
        assert_eq!(forecast.days[0].condition, "scattered clouds");
        assert_eq!(forecast.days[1].day_temp_c, 16.5);
    }

    #[test]
    fn history_payload_keeps_requested_city() {
        let parsed: OwHistoryResponse = serde_json::from_str(HISTORY_JSON).expect("valid JSON");
        let history = map_history("Paris", parsed);

        assert_eq!(history.city, "Paris");
        assert_eq!(history.entries.len(), 1);
        assert_eq!(history.entries[0].icon, "04n");
    }

    #[test]
    fn missing_weather_array_entry_falls_back_to_unknown() {
        let (condition, icon) = condition_of(&[]);
        assert_eq!(condition, "Unknown");
        assert!(icon.is_empty());
    }

    #[test]
    fn long_error_bodies_are_truncated() {
        let body = "x".repeat(500);
        let truncated = truncate_body(&body);
        assert!(truncated.len() <= 203);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn truncation_never_splits_a_multibyte_character() {
        // "é" is two bytes and straddles the truncation limit.
        let body = format!("{}\u{e9} and more", "x".repeat(199));
        let truncated = truncate_body(&body);

        assert!(truncated.ends_with("..."));
        assert_eq!(&truncated[..199], &"x".repeat(199));
    }

    #[test]
    fn service_builds_with_configured_timeout() {
        let service = OpenWeatherService::new("KEY".into(), Duration::from_secs(30));
        assert!(service.is_ok());
    }
}
