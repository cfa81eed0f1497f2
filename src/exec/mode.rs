// src/exec/mode.rs

//! Execution modes and the request type handed to a [`CommandRunner`].
//!
//! [`CommandRunner`]: crate::exec::CommandRunner

use std::fmt;
use std::path::PathBuf;

/// How a command is run and how its result is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmdMode {
    /// Inherit the controlling terminal's stdin/stdout/stderr and block until
    /// the command exits.
    Foreground,
    /// Route the command's stdio through a fresh pseudo-terminal and return
    /// immediately. The caller polls the returned handle.
    Background,
    /// Pipe stdout/stderr, block until exit and keep the trimmed output.
    CaptureResult,
    /// Launch the command inside a new terminal-emulator window, fully
    /// detached. There is no result tracking.
    SpawnNewTerminal,
    /// Replace the gale process image with the command. On success this
    /// never returns; the command inherits the PID, environment and
    /// controlling terminal.
    Replace,
}

impl CmdMode {
    /// Modes where the caller waits for the worker before getting the
    /// handle back.
    pub fn is_blocking(self) -> bool {
        matches!(self, CmdMode::Foreground | CmdMode::CaptureResult)
    }
}

impl fmt::Display for CmdMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CmdMode::Foreground => "foreground",
            CmdMode::Background => "background",
            CmdMode::CaptureResult => "capture",
            CmdMode::SpawnNewTerminal => "new-terminal",
            CmdMode::Replace => "replace",
        };
        f.write_str(s)
    }
}

/// A single command invocation request.
///
/// `cmd` is interpreted by the platform shell. `cwd` defaults to the
/// workspace root. `fatal` (default `true`) turns a non-zero exit code into
/// an error for the whole tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdRequest {
    pub cmd: String,
    pub desc: String,
    pub mode: CmdMode,
    pub cwd: Option<PathBuf>,
    pub fatal: bool,
}

impl CmdRequest {
    pub fn new(cmd: impl Into<String>, desc: impl Into<String>, mode: CmdMode) -> Self {
        Self {
            cmd: cmd.into(),
            desc: desc.into(),
            mode,
            cwd: None,
            fatal: true,
        }
    }

    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn fatal(mut self, fatal: bool) -> Self {
        self.fatal = fatal;
        self
    }
}
