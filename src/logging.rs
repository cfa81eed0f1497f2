// src/logging.rs

//! Logging setup for `gale` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `-v/--verbose` (debug)
//! 3. `GALE_LOG` environment variable (e.g. "info", "debug")
//! 4. default to `info`
//!
//! Logs are sent to STDERR so that command stdout can be piped onwards.

use anyhow::Result;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>, verbose: bool) -> Result<()> {
    let level = resolve_level(cli_level, verbose, std::env::var("GALE_LOG").ok().as_deref());

    fmt()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Pick the effective level from the CLI flag, the verbose switch and the
/// value of `GALE_LOG`.
pub fn resolve_level(
    cli_level: Option<LogLevel>,
    verbose: bool,
    env_level: Option<&str>,
) -> tracing::Level {
    match cli_level {
        Some(lvl) => level_from_log_level(lvl),
        None if verbose => tracing::Level::DEBUG,
        None => env_level
            .and_then(parse_level_str)
            .unwrap_or(tracing::Level::INFO),
    }
}

fn level_from_log_level(lvl: LogLevel) -> tracing::Level {
    match lvl {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    }
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}
