// src/net.rs

//! Readiness probe for locally started servers.

use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::{Instant, sleep, timeout};
use tracing::debug;

/// Default time to wait for a server to come up.
pub const DEFAULT_PORT_TIMEOUT: Duration = Duration::from_secs(10);

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Poll `127.0.0.1:<port>` until a TCP connect succeeds or `limit` elapses.
///
/// Returns `false` on timeout; whether that is fatal is up to the caller.
pub async fn wait_for_port(port: u16, limit: Duration) -> bool {
    let start = Instant::now();

    while start.elapsed() < limit {
        let remaining = limit.saturating_sub(start.elapsed());
        match timeout(remaining, TcpStream::connect(("127.0.0.1", port))).await {
            Ok(Ok(_)) => {
                debug!(port, elapsed = ?start.elapsed(), "port is open");
                return true;
            }
            Ok(Err(e)) => debug!(port, error = %e, "port not open yet"),
            Err(_) => break,
        }

        let remaining = limit.saturating_sub(start.elapsed());
        sleep(POLL_INTERVAL.min(remaining)).await;
    }

    false
}
