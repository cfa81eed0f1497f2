// tests/config_loading.rs

use std::io::Write;

use gale::config::{GaleConfig, load_and_validate, load_or_default};
use gale::errors::GaleError;
use gale::exec::TerminalLauncher;
use tempfile::{NamedTempFile, TempDir};

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let cfg = load_or_default(dir.path().join("gale.toml")).unwrap();

    assert_eq!(cfg, GaleConfig::default());
    assert_eq!(cfg.bsim.handbrake_interval_ns, 5_000);
    assert!(cfg.bsim.tracing);
    assert_eq!(cfg.sca.port, 8001);
    assert_eq!(cfg.sca.startup_timeout_secs, 10);
    assert_eq!(cfg.monitor.baud, 115_200);
    assert_eq!(cfg.terminal_launcher(), TerminalLauncher::Platform);
}

#[test]
fn explicit_path_must_exist() {
    let dir = TempDir::new().unwrap();
    let result = load_and_validate(dir.path().join("nope.toml"));
    assert!(matches!(result, Err(GaleError::IoError(_))));
}

#[test]
fn sections_override_defaults() {
    let file = config_file(
        r#"
[bsim]
handbrake_interval_ns = 2000000
tracing = false

[sca]
port = 9000

[terminal]
launcher = ["gnome-terminal", "--", "sh", "-c"]
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.bsim.handbrake_interval_ns, 2_000_000);
    assert!(!cfg.bsim.tracing);
    assert_eq!(cfg.sca.port, 9000);
    assert_eq!(cfg.sca.startup_timeout_secs, 10);
    assert_eq!(cfg.monitor.baud, 115_200);
    assert_eq!(
        cfg.terminal_launcher(),
        TerminalLauncher::Custom(vec![
            "gnome-terminal".to_string(),
            "--".to_string(),
            "sh".to_string(),
            "-c".to_string(),
        ])
    );
}

#[test]
fn zero_values_are_rejected() {
    for (section, body) in [
        ("bsim", "handbrake_interval_ns = 0"),
        ("sca", "port = 0"),
        ("sca", "startup_timeout_secs = 0"),
        ("monitor", "baud = 0"),
    ] {
        let file = config_file(&format!("[{section}]\n{body}\n"));
        match load_and_validate(file.path()) {
            Err(GaleError::ConfigError(msg)) => {
                assert!(msg.contains(&format!("[{section}]")), "{msg}");
                assert!(msg.contains("got 0"), "{msg}");
            }
            other => panic!("Expected ConfigError for {body}, got: {:?}", other),
        }
    }
}

#[test]
fn empty_launcher_is_rejected() {
    let file = config_file("[terminal]\nlauncher = []\n");
    match load_and_validate(file.path()) {
        Err(GaleError::ConfigError(msg)) => assert!(msg.contains("launcher")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn unknown_keys_are_toml_errors() {
    let file = config_file("[bsim]\nhandbrake = 1\n");
    assert!(matches!(
        load_and_validate(file.path()),
        Err(GaleError::TomlError(_))
    ));
}

#[test]
fn startup_timeout_as_duration() {
    let cfg = GaleConfig::default();
    assert_eq!(cfg.sca.startup_timeout(), std::time::Duration::from_secs(10));
}
