use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use inquire::{Confirm, InquireError, Password, Text};

use skycast_core::{
    CacheProvider, Config, DEFAULT_CITY, DiskCache, ErrorKind, KEY_LAST_CITY, LoadState, MainView,
    WeatherInteractor, WeatherPresenter, service_from_config,
};

use crate::net;
use crate::view::ConsoleView;

/// Pressing Esc twice within this window exits the interactive loop.
const EXIT_WINDOW: Duration = Duration::from_millis(2500);

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "City weather in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather and the multi-day forecast for a city.
    Show {
        /// City name, e.g. "London".
        city: String,
    },

    /// Show historical weather for a city.
    History {
        /// City name, e.g. "London".
        city: String,
    },

    /// Configure the OpenWeatherMap API key and default city.
    Configure,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Show { city }) => App::build()?.show(&city).await,
            Some(Command::History { city }) => App::build()?.history(&city).await,
            None => App::build()?.interactive().await,
        }
    }
}

struct App {
    presenter: Arc<WeatherPresenter>,
    cache: Arc<dyn CacheProvider>,
    // Strong reference keeping the presenter's weak view alive.
    view: Arc<dyn MainView>,
    fallback_city: String,
}

impl App {
    fn build() -> Result<Self> {
        let config = Config::load()?;
        let service = service_from_config(&config)?;
        let cache: Arc<dyn CacheProvider> = Arc::new(DiskCache::open(Config::cache_file_path()?));

        let presenter = Arc::new(WeatherPresenter::new(
            WeatherInteractor::new(service),
            cache.clone(),
        ));

        let view: Arc<dyn MainView> = Arc::new(ConsoleView);
        presenter.attach_view(&view);

        let fallback_city = config.default_city.unwrap_or_else(|| DEFAULT_CITY.to_owned());

        Ok(Self { presenter, cache, view, fallback_city })
    }

    async fn show(&self, city: &str) -> Result<()> {
        self.presenter.load_weather(city, net::is_connected().await).await;
        self.check_outcome(city)
    }

    async fn history(&self, city: &str) -> Result<()> {
        self.presenter.load_weather_history(city, net::is_connected().await).await;
        self.check_outcome(city)
    }

    /// One-shot commands report failure through the exit code; the view
    /// has already printed the message.
    fn check_outcome(&self, city: &str) -> Result<()> {
        if let LoadState::Error(_) = self.presenter.state() {
            bail!("could not load weather for {city}");
        }
        Ok(())
    }

    async fn interactive(&self) -> Result<()> {
        println!("skycast: type a city name; press Esc twice to exit.");

        let mut last_cancel: Option<Instant> = None;

        loop {
            let initial = self.cache.get_string(KEY_LAST_CITY, &self.fallback_city);

            let input = match Text::new("City:").with_initial_value(&initial).prompt() {
                Ok(input) => input,
                Err(InquireError::OperationCanceled) => {
                    // Double-cancel within the window exits, mirroring
                    // double-back-to-exit on the original screen.
                    if matches!(last_cancel, Some(at) if at.elapsed() < EXIT_WINDOW) {
                        return Ok(());
                    }
                    self.view.show_toast_message("Press Esc again to exit");
                    last_cancel = Some(Instant::now());
                    continue;
                }
                Err(InquireError::OperationInterrupted) => return Ok(()),
                Err(e) => return Err(e.into()),
            };
            last_cancel = None;

            let city = input.trim().to_owned();
            if city.is_empty() {
                continue;
            }

            self.presenter.load_weather(&city, net::is_connected().await).await;

            match self.presenter.state() {
                LoadState::Error(ErrorKind::Generic) => {
                    if confirm("Retry the same city?", true) {
                        self.presenter.load_weather(&city, net::is_connected().await).await;
                    }
                }
                LoadState::Success => {
                    let question = format!("Show weather history for {city}?");
                    if confirm(&question, false) {
                        self.presenter
                            .load_weather_history(&city, net::is_connected().await)
                            .await;
                    }
                }
                _ => {}
            }
        }
    }
}

fn confirm(question: &str, default: bool) -> bool {
    Confirm::new(question).with_default(default).prompt().unwrap_or(false)
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .prompt()?;

    let default_city = Text::new("Default city:")
        .with_initial_value(config.default_city.as_deref().unwrap_or(DEFAULT_CITY))
        .prompt()?;

    config.api_key = Some(api_key);
    config.default_city = Some(default_city);
    config.save()?;

    println!("Configuration saved to {}", Config::config_file_path()?.display());
    Ok(())
}
