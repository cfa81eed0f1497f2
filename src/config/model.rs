// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

use crate::exec::TerminalLauncher;

/// Configuration as read from `gale.toml`.
///
/// ```toml
/// [bsim]
/// handbrake_interval_ns = 5000
/// tracing = true
///
/// [sca]
/// port = 8001
/// startup_timeout_secs = 10
///
/// [monitor]
/// baud = 115200
///
/// [terminal]
/// launcher = ["gnome-terminal", "--", "sh", "-c"]
/// ```
///
/// Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawGaleConfig {
    #[serde(default)]
    pub bsim: BsimSection,

    #[serde(default)]
    pub sca: ScaSection,

    #[serde(default)]
    pub monitor: MonitorSection,

    #[serde(default)]
    pub terminal: TerminalSection,
}

/// `[bsim]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BsimSection {
    /// How often the handbrake device pokes a real-time simulation. Also
    /// used as the app's max resync offset (`--mro`).
    #[serde(default = "default_handbrake_interval_ns")]
    pub handbrake_interval_ns: u64,

    /// Write CTF trace data into the run's results directory.
    #[serde(default = "default_tracing")]
    pub tracing: bool,
}

fn default_handbrake_interval_ns() -> u64 {
    5_000
}

fn default_tracing() -> bool {
    true
}

impl Default for BsimSection {
    fn default() -> Self {
        Self {
            handbrake_interval_ns: default_handbrake_interval_ns(),
            tracing: default_tracing(),
        }
    }
}

/// `[sca]` section (CodeChecker server).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaSection {
    #[serde(default = "default_sca_port")]
    pub port: u16,

    #[serde(default = "default_startup_timeout_secs")]
    pub startup_timeout_secs: u64,
}

fn default_sca_port() -> u16 {
    8001
}

fn default_startup_timeout_secs() -> u64 {
    10
}

impl Default for ScaSection {
    fn default() -> Self {
        Self {
            port: default_sca_port(),
            startup_timeout_secs: default_startup_timeout_secs(),
        }
    }
}

impl ScaSection {
    pub fn startup_timeout(&self) -> Duration {
        Duration::from_secs(self.startup_timeout_secs)
    }
}

/// `[monitor]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorSection {
    #[serde(default = "default_baud")]
    pub baud: u32,
}

fn default_baud() -> u32 {
    115_200
}

impl Default for MonitorSection {
    fn default() -> Self {
        Self {
            baud: default_baud(),
        }
    }
}

/// `[terminal]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TerminalSection {
    /// Program and flags used to open a new terminal; the command line is
    /// appended as the last argument. Platform default when absent.
    #[serde(default)]
    pub launcher: Option<Vec<String>>,
}

/// Validated configuration.
///
/// Construct via `GaleConfig::try_from(raw)` or the loader helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GaleConfig {
    pub bsim: BsimSection,
    pub sca: ScaSection,
    pub monitor: MonitorSection,
    pub terminal: TerminalSection,
}

impl GaleConfig {
    /// Build without validation; used by `TryFrom` after checks pass.
    pub(crate) fn new_unchecked(raw: RawGaleConfig) -> Self {
        Self {
            bsim: raw.bsim,
            sca: raw.sca,
            monitor: raw.monitor,
            terminal: raw.terminal,
        }
    }

    /// How SPAWN_NEW_TERMINAL commands should open their window.
    pub fn terminal_launcher(&self) -> TerminalLauncher {
        match &self.terminal.launcher {
            Some(prefix) => TerminalLauncher::Custom(prefix.clone()),
            None => TerminalLauncher::Platform,
        }
    }
}

impl Default for GaleConfig {
    fn default() -> Self {
        Self::new_unchecked(RawGaleConfig::default())
    }
}
