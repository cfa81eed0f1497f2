// src/data/boards.rs

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;

use crate::bsim::FlashLayout;
use crate::errors::{GaleError, Result};
use crate::workspace::Workspace;

use super::projects::ProjectId;

/// A board gale can build for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum BoardId {
    #[value(name = "nrf54l15dk")]
    Nrf54l15Dk,
    #[value(name = "nrf54l15bsim")]
    Nrf54l15Bsim,
    #[value(name = "nrf5340bsim")]
    Nrf5340Bsim,
}

impl BoardId {
    pub fn name(self) -> &'static str {
        match self {
            BoardId::Nrf54l15Dk => "nrf54l15dk",
            BoardId::Nrf54l15Bsim => "nrf54l15bsim",
            BoardId::Nrf5340Bsim => "nrf5340bsim",
        }
    }

    /// Board identifier handed to `west build -b`.
    pub fn west_board(self) -> &'static str {
        match self {
            BoardId::Nrf54l15Dk => "nrf54l15dk/nrf54l15/cpuapp",
            BoardId::Nrf54l15Bsim => "nrf54l15bsim/nrf54l15/cpuapp",
            BoardId::Nrf5340Bsim => "nrf5340bsim/nrf5340/cpuapp",
        }
    }

    /// Directory with the board's environment file, overlays and Kconfig.
    pub fn dir(self, workspace: &Workspace) -> PathBuf {
        ProjectId::Shared
            .dir(workspace)
            .join("boards")
            .join(self.name())
    }

    /// The board's environment file; it must exist.
    pub fn env_file(self, workspace: &Workspace) -> Result<PathBuf> {
        let file = self.dir(workspace).join("environment");
        if !file.is_file() {
            return Err(GaleError::ConfigError(format!(
                "Environment file for board '{}' not found ({})",
                self.name(),
                file.display()
            )));
        }
        Ok(file)
    }

    /// Simulated (BabbleSim) boards run natively on the host.
    pub fn is_bsim(self) -> bool {
        self.flash_layout().is_some()
    }

    /// How the simulated flash is backed; `None` for real hardware.
    pub fn flash_layout(self) -> Option<FlashLayout> {
        match self {
            BoardId::Nrf54l15Dk => None,
            BoardId::Nrf54l15Bsim => Some(FlashLayout::Single),
            BoardId::Nrf5340Bsim => Some(FlashLayout::AppNet),
        }
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
