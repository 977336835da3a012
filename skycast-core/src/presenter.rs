//! Presenter mediating between the interactor and the view.
//!
//! Owns the per-request lifecycle state machine
//! (`Idle -> Loading -> Success | Error`) and decides which view
//! callback fires. The view is held through a weak reference so a
//! detached screen never receives late callbacks.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::cache::{CacheProvider, DEFAULT_CITY, KEY_LAST_CITY};
use crate::error::{ErrorKind, WeatherError};
use crate::interactor::WeatherInteractor;
use crate::model::{CurrentWeather, Forecast, WeatherData, WeatherHistory, WeatherQuery};

/// Passive display surface implemented by the active screen.
pub trait MainView: Send + Sync {
    fn show_progress(&self);
    fn hide_progress(&self);
    fn update_progress_message(&self, message: &str);
    fn set_weather_values(&self, current: &CurrentWeather, forecast: &Forecast);
    fn set_weather_history_values(&self, history: &WeatherHistory);
    fn show_offline_message(&self);
    fn show_connection_error(&self);
    fn show_retry_message(&self);
    fn show_toast_message(&self, message: &str);
}

/// Request lifecycle state. `Success` and `Error` are terminal per
/// request; the next submission re-enters `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Success,
    Error(ErrorKind),
}

pub struct WeatherPresenter {
    interactor: WeatherInteractor,
    cache: Arc<dyn CacheProvider>,
    view: Mutex<Option<Weak<dyn MainView>>>,
    state: Mutex<LoadState>,
    // Sequence numbers making the newest submission of each kind the
    // authoritative one; stale responses are dropped on arrival. Main
    // and history requests target different view regions, so each kind
    // tracks its own.
    weather_seq: AtomicU64,
    history_seq: AtomicU64,
}

impl WeatherPresenter {
    pub fn new(interactor: WeatherInteractor, cache: Arc<dyn CacheProvider>) -> Self {
        Self {
            interactor,
            cache,
            view: Mutex::new(None),
            state: Mutex::new(LoadState::Idle),
            weather_seq: AtomicU64::new(0),
            history_seq: AtomicU64::new(0),
        }
    }

    /// Attach the active view. The presenter keeps a non-owning
    /// reference only.
    pub fn attach_view(&self, view: &Arc<dyn MainView>) {
        *self.view.lock().expect("view lock") = Some(Arc::downgrade(view));
    }

    /// Clear the view reference so no further callback fires into a
    /// destroyed screen.
    pub fn detach_view(&self) {
        *self.view.lock().expect("view lock") = None;
    }

    pub fn state(&self) -> LoadState {
        *self.state.lock().expect("state lock")
    }

    /// Most recently persisted city, for pre-filling the input prompt.
    pub fn last_city(&self) -> String {
        self.cache.get_string(KEY_LAST_CITY, DEFAULT_CITY)
    }

    /// Load current conditions plus forecast for `city`.
    ///
    /// Empty input is a local no-op. When disconnected the network is
    /// never contacted and the offline message fires immediately.
    pub async fn load_weather(&self, city: &str, is_connected: bool) {
        let Some(city) = self.accept(city, is_connected) else {
            return;
        };

        let issued = self.issue(&self.weather_seq);
        self.begin_loading(&format!("Loading weather for {city}..."));

        let query = WeatherQuery::new(city, is_connected);
        let result = self.interactor.load_weather(&query).await;

        if self.superseded(&self.weather_seq, issued) {
            tracing::debug!(city = %query.city, "dropping superseded weather response");
            return;
        }
        self.complete(result);
    }

    /// Load historical weather for `city`. Replaces displayed content
    /// on success; never touches the persisted last city.
    pub async fn load_weather_history(&self, city: &str, is_connected: bool) {
        let Some(city) = self.accept(city, is_connected) else {
            return;
        };

        let issued = self.issue(&self.history_seq);
        self.begin_loading(&format!("Loading weather history for {city}..."));

        let query = WeatherQuery::new(city, is_connected);
        let result = self.interactor.load_history(&query).await;

        if self.superseded(&self.history_seq, issued) {
            tracing::debug!(city = %query.city, "dropping superseded history response");
            return;
        }
        self.complete(result);
    }

    fn issue(&self, seq: &AtomicU64) -> u64 {
        seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn superseded(&self, seq: &AtomicU64, issued: u64) -> bool {
        seq.load(Ordering::SeqCst) != issued
    }

    /// Pre-dispatch validation shared by both loads. Returns the
    /// trimmed city when the request should proceed.
    fn accept(&self, city: &str, is_connected: bool) -> Option<String> {
        let city = city.trim();
        if city.is_empty() {
            tracing::debug!("ignoring empty city submission");
            return None;
        }

        if !is_connected {
            tracing::debug!(city, "offline at submission, network not contacted");
            self.set_state(LoadState::Error(ErrorKind::Offline));
            self.with_view(|v| v.show_offline_message());
            return None;
        }

        Some(city.to_owned())
    }

    fn begin_loading(&self, message: &str) {
        self.set_state(LoadState::Loading);
        self.with_view(|v| {
            v.show_progress();
            v.update_progress_message(message);
        });
    }

    fn complete(&self, result: Result<WeatherData, WeatherError>) {
        match result {
            Ok(WeatherData::CurrentAndForecast(current, forecast)) => {
                tracing::debug!(city = %current.city, "weather loaded");
                self.set_state(LoadState::Success);
                self.cache.set_value(KEY_LAST_CITY, &current.city);
                self.with_view(|v| {
                    v.hide_progress();
                    v.set_weather_values(&current, &forecast);
                });
            }
            Ok(WeatherData::History(history)) => {
                tracing::debug!(city = %history.city, "weather history loaded");
                self.set_state(LoadState::Success);
                self.with_view(|v| {
                    v.hide_progress();
                    v.set_weather_history_values(&history);
                });
            }
            Err(e) => {
                let kind = e.kind();
                tracing::warn!("weather load failed: {e}");
                self.set_state(LoadState::Error(kind));
                self.with_view(|v| {
                    v.hide_progress();
                    match kind {
                        ErrorKind::Offline => v.show_offline_message(),
                        ErrorKind::Connection => v.show_connection_error(),
                        ErrorKind::Generic => v.show_retry_message(),
                    }
                });
            }
        }
    }

    fn set_state(&self, next: LoadState) {
        let mut state = self.state.lock().expect("state lock");
        tracing::debug!(from = ?*state, to = ?next, "presenter state transition");
        *state = next;
    }

    /// Run `f` against the view if one is still attached; otherwise the
    /// callback is dropped silently.
    fn with_view(&self, f: impl FnOnce(&dyn MainView)) {
        let view = self
            .view
            .lock()
            .expect("view lock")
            .as_ref()
            .and_then(Weak::upgrade);

        match view {
            Some(view) => f(view.as_ref()),
            None => tracing::debug!("view detached, dropping callback"),
        }
    }
}
