use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::{
    Config, CurrentWeather, Forecast, WeatherError, WeatherHistory,
    service::openweather::OpenWeatherService,
};

pub mod openweather;

/// Remote weather API, keyed by city name.
///
/// Failures carry enough information to distinguish "unreachable"
/// ([`WeatherError::Connection`]) from "reachable but failed" (bad city,
/// server error).
#[async_trait]
pub trait WeatherApiService: Send + Sync + Debug {
    /// Current conditions plus the multi-day forecast, fetched together
    /// for the main screen.
    async fn current_and_forecast(
        &self,
        city: &str,
    ) -> Result<(CurrentWeather, Forecast), WeatherError>;

    /// Historical observations, fetched on demand.
    async fn history(&self, city: &str) -> Result<WeatherHistory, WeatherError>;
}

/// Construct the production service from config.
pub fn service_from_config(config: &Config) -> Result<Arc<dyn WeatherApiService>, WeatherError> {
    let api_key = config.api_key()?;
    let timeout = Duration::from_secs(config.network_timeout_secs);
    Ok(Arc::new(OpenWeatherService::new(api_key.to_owned(), timeout)?))
}
