// tests/logging_levels.rs

use gale::cli::LogLevel;
use gale::logging::resolve_level;
use tracing::Level;

#[test]
fn cli_flag_wins() {
    assert_eq!(resolve_level(Some(LogLevel::Warn), true, Some("trace")), Level::WARN);
    assert_eq!(resolve_level(Some(LogLevel::Trace), false, None), Level::TRACE);
}

#[test]
fn verbose_selects_debug() {
    assert_eq!(resolve_level(None, true, Some("error")), Level::DEBUG);
}

#[test]
fn env_value_is_used_next() {
    assert_eq!(resolve_level(None, false, Some("debug")), Level::DEBUG);
    assert_eq!(resolve_level(None, false, Some(" WARNING ")), Level::WARN);
}

#[test]
fn default_is_info() {
    assert_eq!(resolve_level(None, false, None), Level::INFO);
    assert_eq!(resolve_level(None, false, Some("chatty")), Level::INFO);
}
