//! Error taxonomy for weather loads.
//!
//! [`WeatherError`] is the single error type returned by every fallible
//! load in the core. The presenter only cares about three buckets
//! ([`ErrorKind`]): offline (network never contacted), connection
//! (contacted but unreachable), and everything else.

use reqwest::StatusCode;

/// Error type for all weather operations.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// No connectivity at submission time; the network was never contacted.
    #[error("no network connectivity, request was not attempted")]
    Offline,

    /// The network was contacted but the service was unreachable or timed out.
    #[error("could not reach the weather service: {0}")]
    Connection(#[source] reqwest::Error),

    /// The service answered with a non-success status (bad city, server error).
    #[error("weather service returned {status}: {body}")]
    Api { status: StatusCode, body: String },

    /// The service answered but the payload could not be decoded.
    #[error("failed to decode weather payload: {0}")]
    BadPayload(#[from] serde_json::Error),

    /// Invalid or missing configuration (e.g. no API key).
    #[error("configuration error: {0}")]
    Config(String),
}

/// Coarse classification used for messaging at the presenter boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Offline,
    Connection,
    Generic,
}

impl WeatherError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherError::Offline => ErrorKind::Offline,
            WeatherError::Connection(_) => ErrorKind::Connection,
            WeatherError::Api { .. } | WeatherError::BadPayload(_) | WeatherError::Config(_) => {
                ErrorKind::Generic
            }
        }
    }
}

// Transport-level failures (connect refused, DNS, timeout) surface from
// reqwest before any status code exists; HTTP error statuses are mapped
// to `Api` by the service itself.
impl From<reqwest::Error> for WeatherError {
    fn from(e: reqwest::Error) -> Self {
        WeatherError::Connection(e)
    }
}
