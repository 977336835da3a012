//! The single "load weather for city X" use case.
//!
//! Pure orchestration: short-circuit when disconnected, delegate to the
//! service otherwise, wrap the outcome in [`WeatherData`]. No retry, no
//! caching decision beyond "never call the network when disconnected".

use std::sync::Arc;

use crate::model::{WeatherData, WeatherQuery};
use crate::service::WeatherApiService;
use crate::WeatherError;

#[derive(Debug, Clone)]
pub struct WeatherInteractor {
    service: Arc<dyn WeatherApiService>,
}

impl WeatherInteractor {
    pub fn new(service: Arc<dyn WeatherApiService>) -> Self {
        Self { service }
    }

    /// Current conditions plus forecast for the main screen.
    pub async fn load_weather(&self, query: &WeatherQuery) -> Result<WeatherData, WeatherError> {
        if !query.is_connected {
            return Err(WeatherError::Offline);
        }

        let (current, forecast) = self.service.current_and_forecast(&query.city).await?;
        Ok(WeatherData::CurrentAndForecast(current, forecast))
    }

    /// Historical observations, requested on demand.
    pub async fn load_history(&self, query: &WeatherQuery) -> Result<WeatherData, WeatherError> {
        if !query.is_connected {
            return Err(WeatherError::Offline);
        }

        let history = self.service.history(&query.city).await?;
        Ok(WeatherData::History(history))
    }
}
