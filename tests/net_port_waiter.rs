// tests/net_port_waiter.rs

mod common;

use std::time::{Duration, Instant};

use common::{TestResult, init_tracing};
use gale::net::wait_for_port;
use tokio::net::TcpListener;

async fn free_port() -> Result<u16, Box<dyn std::error::Error>> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    Ok(listener.local_addr()?.port())
}

#[tokio::test]
async fn open_port_is_detected_immediately() -> TestResult {
    init_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();

    let start = Instant::now();
    assert!(wait_for_port(port, Duration::from_secs(2)).await);
    assert!(start.elapsed() < Duration::from_millis(500));
    Ok(())
}

#[tokio::test]
async fn closed_port_times_out_after_limit() -> TestResult {
    init_tracing();
    let port = free_port().await?;

    let start = Instant::now();
    assert!(!wait_for_port(port, Duration::from_millis(300)).await);
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(300), "returned after {elapsed:?}");
    assert!(elapsed < Duration::from_millis(800), "returned after {elapsed:?}");
    Ok(())
}

#[tokio::test]
async fn server_coming_up_late_is_detected() -> TestResult {
    init_tracing();
    let port = free_port().await?;

    let server = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(250)).await;
        let listener = TcpListener::bind(("127.0.0.1", port)).await?;
        tokio::time::sleep(Duration::from_secs(2)).await;
        drop(listener);
        Ok::<_, std::io::Error>(())
    });

    assert!(wait_for_port(port, Duration::from_secs(3)).await);
    server.abort();
    Ok(())
}

#[tokio::test]
async fn zero_limit_never_succeeds() -> TestResult {
    init_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();

    assert!(!wait_for_port(port, Duration::ZERO).await);
    Ok(())
}
