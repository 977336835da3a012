//! Point-in-time connectivity sampling.
//!
//! The snapshot is taken once per submission and passed into the
//! presenter; connectivity is not tracked continuously.

use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::timeout;

const PROBE_ADDR: &str = "api.openweathermap.org:443";
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Returns whether the weather service host is reachable right now.
pub async fn is_connected() -> bool {
    probe(PROBE_ADDR).await
}

async fn probe(addr: &str) -> bool {
    match timeout(PROBE_TIMEOUT, TcpStream::connect(addr)).await {
        Ok(Ok(_)) => true,
        Ok(Err(e)) => {
            tracing::debug!("connectivity probe to {addr} failed: {e}");
            false
        }
        Err(_) => {
            tracing::debug!("connectivity probe to {addr} timed out");
            false
        }
    }
}
