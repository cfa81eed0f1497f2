// src/workspace.rs

//! Workspace layout and discovery.
//!
//! ```text
//! <west topdir>/
//!   gale/                 manifest dir (this repo, gale.toml)
//!     projects/           everything west pulls in
//!       tools/bsim/       BabbleSim checkout
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::{GaleError, Result};
use crate::exec::{CmdMode, CmdRequest, CommandRunner};

/// Environment variable that short-circuits `west topdir`.
pub const TOPDIR_ENV: &str = "GALE_WEST_TOPDIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    topdir: PathBuf,
}

impl Workspace {
    pub fn new(topdir: impl Into<PathBuf>) -> Self {
        Self {
            topdir: topdir.into(),
        }
    }

    /// Locate the west workspace: `GALE_WEST_TOPDIR` if set, otherwise the
    /// output of `west topdir` run from the current directory.
    pub async fn discover(runner: &dyn CommandRunner) -> Result<Self> {
        if let Ok(dir) = std::env::var(TOPDIR_ENV) {
            if !dir.trim().is_empty() {
                debug!(topdir = %dir, "workspace root taken from {TOPDIR_ENV}");
                return Ok(Self::new(dir.trim()));
            }
        }

        let handle = runner
            .run_command(
                CmdRequest::new("west topdir", "Determining WEST_TOPDIR", CmdMode::CaptureResult)
                    .cwd("."),
            )
            .await?;
        let topdir = handle.stdout();
        if topdir.is_empty() {
            return Err(GaleError::ConfigError(
                "`west topdir` did not report a workspace".to_string(),
            ));
        }
        Ok(Self::new(topdir))
    }

    pub fn topdir(&self) -> &Path {
        &self.topdir
    }

    pub fn manifest_dir(&self) -> PathBuf {
        self.topdir.join("gale")
    }

    pub fn projects_dir(&self) -> PathBuf {
        self.manifest_dir().join("projects")
    }

    pub fn tools_dir(&self) -> PathBuf {
        self.projects_dir().join("tools")
    }

    pub fn bsim_dir(&self) -> PathBuf {
        self.tools_dir().join("bsim")
    }

    /// Default location of `gale.toml`.
    pub fn config_path(&self) -> PathBuf {
        self.manifest_dir().join("gale.toml")
    }
}

/// Load a dotenv-style environment file into the process environment.
///
/// Variables that are already set are left alone. Interesting variables
/// (zephyr, west, board) are logged.
pub fn source_environment(env_file: &Path) -> Result<()> {
    dotenvy::from_path(env_file).map_err(|e| {
        GaleError::ConfigError(format!(
            "failed to load environment file {}: {e}",
            env_file.display()
        ))
    })?;

    for (key, value) in std::env::vars() {
        let lower = key.to_lowercase();
        if ["zephyr", "west", "board"].iter().any(|k| lower.contains(k)) {
            info!("{key}: {value}");
        }
    }
    Ok(())
}
