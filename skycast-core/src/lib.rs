//! Core library for the `skycast` weather app.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The remote weather service abstraction and its OpenWeatherMap impl
//! - The load-weather use case (interactor) and presenter state machine
//! - Thin key-value persistence for the last-loaded city
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries
//! or services: the presenter talks to any [`MainView`] implementation.

pub mod cache;
pub mod config;
pub mod error;
pub mod interactor;
pub mod model;
pub mod presenter;
pub mod service;

pub use cache::{CacheProvider, DiskCache, MemoryCache, DEFAULT_CITY, KEY_LAST_CITY};
pub use config::Config;
pub use error::{ErrorKind, WeatherError};
pub use interactor::WeatherInteractor;
pub use model::{
    CurrentWeather, Forecast, ForecastDay, HistoryEntry, WeatherData, WeatherHistory, WeatherQuery,
};
pub use presenter::{LoadState, MainView, WeatherPresenter};
pub use service::{service_from_config, WeatherApiService};
