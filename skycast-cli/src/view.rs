//! Terminal implementation of the core's `MainView`.
//!
//! Weather data goes to stdout; progress and error prompts go to
//! stderr so piped output stays clean.

use skycast_core::{CurrentWeather, Forecast, ForecastDay, HistoryEntry, MainView, WeatherHistory};

#[derive(Debug, Default)]
pub struct ConsoleView;

impl MainView for ConsoleView {
    fn show_progress(&self) {
        // Progress is a single message line in a terminal; nothing to
        // reveal or hide.
    }

    fn hide_progress(&self) {}

    fn update_progress_message(&self, message: &str) {
        eprintln!("{message}");
    }

    fn set_weather_values(&self, current: &CurrentWeather, forecast: &Forecast) {
        println!("{}", format_current(current));
        println!("\nForecast for {}:", forecast.city);
        for day in &forecast.days {
            println!("{}", format_forecast_day(day));
        }
    }

    fn set_weather_history_values(&self, history: &WeatherHistory) {
        println!("History for {}:", history.city);
        for entry in &history.entries {
            println!("{}", format_history_entry(entry));
        }
    }

    fn show_offline_message(&self) {
        eprintln!("You are offline. Reconnect and submit the city again.");
    }

    fn show_connection_error(&self) {
        eprintln!("Could not reach the weather service. Check your internet connection.");
    }

    fn show_retry_message(&self) {
        eprintln!("Loading weather failed. Try the same city again.");
    }

    fn show_toast_message(&self, message: &str) {
        eprintln!("{message}");
    }
}

fn format_current(current: &CurrentWeather) -> String {
    format!(
        "{} {}  {}\n  temperature  {:.1}\u{b0}C\n  humidity     {}%\n  wind         {:.1} m/s\n  observed     {}",
        icon_glyph(&current.icon),
        current.city,
        current.condition,
        current.temperature_c,
        current.humidity_pct,
        current.wind_speed_mps,
        current.observed_at.format("%H:%M UTC"),
    )
}

fn format_forecast_day(day: &ForecastDay) -> String {
    format!(
        "  {}  {}  {:>5.1}\u{b0}C  {:.1} m/s  {}",
        day.date.format("%d/%m"),
        icon_glyph(&day.icon),
        day.day_temp_c,
        day.wind_speed_mps,
        day.condition,
    )
}

fn format_history_entry(entry: &HistoryEntry) -> String {
    format!(
        "  {}  {}  {:>5.1}\u{b0}C  {}",
        entry.observed_at.format("%d/%m %H:%M"),
        icon_glyph(&entry.icon),
        entry.temperature_c,
        entry.condition,
    )
}

/// OpenWeatherMap icon code to terminal glyph. Codes are two digits
/// plus a day/night suffix, e.g. "01d" or "10n".
fn icon_glyph(code: &str) -> &'static str {
    match code.get(..2) {
        Some("01") if code.ends_with('n') => "\u{1f319}", // 🌙
        Some("01") => "\u{2600}",                         // ☀
        Some("02") => "\u{1f324}",                        // 🌤
        Some("03") | Some("04") => "\u{2601}",            // ☁
        Some("09") => "\u{1f327}",                        // 🌧
        Some("10") => "\u{1f326}",                        // 🌦
        Some("11") => "\u{26c8}",                         // ⛈
        Some("13") => "\u{2744}",                         // ❄
        Some("50") => "\u{1f32b}",                        // 🌫
        _ => "\u{b7}",                                    // ·
    }
}
