use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single user submission: city name plus the connectivity snapshot
/// taken at submission time. Connectivity is a point-in-time sample,
/// not tracked continuously.
#[derive(Debug, Clone)]
pub struct WeatherQuery {
    pub city: String,
    pub is_connected: bool,
}

impl WeatherQuery {
    pub fn new(city: impl Into<String>, is_connected: bool) -> Self {
        Self { city: city.into(), is_connected }
    }
}

/// Current conditions for one city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub city: String,
    pub condition: String,
    pub icon: String,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub observed_at: DateTime<Utc>,
}

/// One day of a multi-day forecast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: DateTime<Utc>,
    pub condition: String,
    pub icon: String,
    pub day_temp_c: f64,
    pub wind_speed_mps: f64,
}

/// Multi-day forecast for one city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub city: String,
    pub days: Vec<ForecastDay>,
}

/// One past observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub observed_at: DateTime<Utc>,
    pub condition: String,
    pub icon: String,
    pub temperature_c: f64,
}

/// Historical observations for one city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherHistory {
    pub city: String,
    pub entries: Vec<HistoryEntry>,
}

/// Successful outcome of a weather load, consumed exactly once by the
/// presenter. Failures travel as [`crate::WeatherError`].
#[derive(Debug, Clone)]
pub enum WeatherData {
    CurrentAndForecast(CurrentWeather, Forecast),
    History(WeatherHistory),
}
