// src/exec/pty.rs

//! Pseudo-terminal allocation for background commands.
//!
//! The child gets the master side as stdin/stdout/stderr. The slave side
//! stays open for the lifetime of the command and its device path
//! (`/dev/pts/N`) is what a terminal program such as `picocom` attaches to.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use crate::errors::{GaleError, Result};

#[cfg(unix)]
use std::os::fd::{AsRawFd, OwnedFd};

/// An allocated master/slave pair.
#[cfg(unix)]
#[derive(Debug)]
pub struct PtyPair {
    master: OwnedFd,
    // Held so the device stays attachable while the command runs.
    _slave: OwnedFd,
    device: PathBuf,
}

#[cfg(unix)]
impl PtyPair {
    pub fn open() -> Result<Self> {
        let pair = nix::pty::openpty(None, None)
            .map_err(|e| GaleError::IoError(std::io::Error::from(e)))?;
        // Later children must not inherit this pty, or it never sees hangup.
        set_cloexec(&pair.master)?;
        set_cloexec(&pair.slave)?;
        let device = nix::unistd::ttyname(&pair.slave)
            .map_err(|e| GaleError::IoError(std::io::Error::from(e)))?;

        Ok(Self {
            master: pair.master,
            _slave: pair.slave,
            device,
        })
    }

    /// Path a terminal program can open to talk to the child.
    pub fn device(&self) -> &Path {
        &self.device
    }

    /// Three independent stdio handles on the master side.
    pub fn child_stdio(&self) -> Result<(Stdio, Stdio, Stdio)> {
        let stdin = Stdio::from(self.master.try_clone()?);
        let stdout = Stdio::from(self.master.try_clone()?);
        let stderr = Stdio::from(self.master.try_clone()?);
        Ok((stdin, stdout, stderr))
    }
}

#[cfg(unix)]
fn set_cloexec(fd: &OwnedFd) -> Result<()> {
    use nix::fcntl::{FcntlArg, FdFlag, fcntl};

    fcntl(fd.as_raw_fd(), FcntlArg::F_SETFD(FdFlag::FD_CLOEXEC))
        .map_err(|e| GaleError::IoError(std::io::Error::from(e)))?;
    Ok(())
}

/// Placeholder on platforms without pseudo-terminals.
#[cfg(not(unix))]
#[derive(Debug)]
pub struct PtyPair {
    device: PathBuf,
}

#[cfg(not(unix))]
impl PtyPair {
    pub fn open() -> Result<Self> {
        Err(GaleError::UnsupportedPlatform(format!(
            "background commands need a pseudo-terminal, which {} does not provide",
            std::env::consts::OS
        )))
    }

    pub fn device(&self) -> &Path {
        &self.device
    }

    pub fn child_stdio(&self) -> Result<(Stdio, Stdio, Stdio)> {
        Ok((Stdio::null(), Stdio::null(), Stdio::null()))
    }
}
