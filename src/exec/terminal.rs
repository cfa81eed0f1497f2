// src/exec/terminal.rs

//! Launching a command inside a new terminal-emulator window.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::errors::{GaleError, Result};

/// Program + leading arguments that open a terminal window running a shell
/// command. The command string is appended as the final argument(s).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TerminalLauncher {
    /// Platform default (`xterm -hold -e sh -c`, Terminal.app, `start cmd /K`).
    #[default]
    Platform,
    /// Explicit prefix from configuration, e.g. `["gnome-terminal", "--", "sh", "-c"]`.
    Custom(Vec<String>),
}

impl TerminalLauncher {
    /// Full argv used to show `cmd` (run inside `cwd`) in a new window.
    pub fn argv(&self, cmd: &str, cwd: &Path) -> Result<Vec<String>> {
        match self {
            TerminalLauncher::Custom(prefix) => {
                if prefix.is_empty() {
                    return Err(GaleError::ConfigError(
                        "terminal launcher must name a program".to_string(),
                    ));
                }
                let mut argv = prefix.clone();
                argv.push(cmd.to_string());
                Ok(argv)
            }
            TerminalLauncher::Platform => platform_argv(cmd, cwd),
        }
    }
}

fn platform_argv(cmd: &str, cwd: &Path) -> Result<Vec<String>> {
    if cfg!(target_os = "linux") {
        // Keep the window open after the command exits so its output stays readable.
        Ok(vec![
            "xterm".to_string(),
            "-hold".to_string(),
            "-e".to_string(),
            "sh".to_string(),
            "-c".to_string(),
            cmd.to_string(),
        ])
    } else if cfg!(target_os = "macos") {
        // Terminal.app starts in $HOME, so the cd has to be part of the script.
        let script = format!(
            "cd {} && {}",
            shell_words::quote(&cwd.to_string_lossy()),
            cmd
        );
        let escaped = script.replace('\\', "\\\\").replace('"', "\\\"");
        Ok(vec![
            "osascript".to_string(),
            "-e".to_string(),
            format!("tell application \"Terminal\" to do script \"{escaped}\""),
        ])
    } else if cfg!(windows) {
        Ok(vec![
            "cmd".to_string(),
            "/C".to_string(),
            "start".to_string(),
            String::new(),
            "cmd".to_string(),
            "/K".to_string(),
            cmd.to_string(),
        ])
    } else {
        Err(GaleError::UnsupportedPlatform(format!(
            "don't know how to open a new terminal on {}",
            std::env::consts::OS
        )))
    }
}

/// Spawn the terminal fully detached. The child is not waited on; tokio
/// reaps it in the background once it exits.
pub fn spawn_detached(launcher: &TerminalLauncher, cmd: &str, cwd: &Path) -> Result<()> {
    let argv = launcher.argv(cmd, cwd)?;
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| GaleError::ConfigError("empty terminal launcher".to_string()))?;

    let mut command = Command::new(program);
    command
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    #[cfg(unix)]
    command.process_group(0);

    let child = command.spawn().map_err(|source| GaleError::SpawnFailed {
        cmd: argv.join(" "),
        source,
    })?;
    debug!(program = %program, pid = ?child.id(), "terminal launched");
    Ok(())
}
