// src/exec/replace.rs

//! Handing the terminal over to another program.
//!
//! On Unix the gale process image is replaced with `execvp`: PID,
//! environment and controlling terminal go to the new program and nothing
//! after the call runs. Elsewhere the command is spawned with inherited
//! stdio, waited on, and gale exits with the child's code.

use std::convert::Infallible;
use std::path::Path;
use std::process::Command;

use crate::errors::{GaleError, Result};

/// Split a command line into argv using shell quoting rules.
pub fn split_command(cmd: &str) -> Result<Vec<String>> {
    let argv = shell_words::split(cmd).map_err(|e| GaleError::InvalidCommand {
        cmd: cmd.to_string(),
        reason: e.to_string(),
    })?;
    if argv.is_empty() {
        return Err(GaleError::InvalidCommand {
            cmd: cmd.to_string(),
            reason: "empty command".to_string(),
        });
    }
    Ok(argv)
}

/// Replace the current process with `cmd`, run from `cwd`.
///
/// Only returns on failure.
pub fn replace_process(cmd: &str, cwd: &Path) -> Result<Infallible> {
    let argv = split_command(cmd)?;
    std::env::set_current_dir(cwd)
        .map_err(|_| GaleError::InvalidWorkingDirectory(cwd.to_path_buf()))?;

    let mut command = Command::new(&argv[0]);
    command.args(&argv[1..]);
    exec(command, cmd)
}

#[cfg(unix)]
fn exec(mut command: Command, cmd: &str) -> Result<Infallible> {
    use std::os::unix::process::CommandExt;

    // exec() only returns on error.
    let source = command.exec();
    Err(GaleError::SpawnFailed {
        cmd: cmd.to_string(),
        source,
    })
}

/// Without `exec`, gale stays the parent. Signals are not forwarded: the
/// console delivers Ctrl-C to the child directly, and gale's own Ctrl-C
/// listener cannot act while this call blocks the runtime thread, so the
/// child decides how to stop and gale exits with its code.
#[cfg(not(unix))]
fn exec(mut command: Command, cmd: &str) -> Result<Infallible> {
    let status = command.status().map_err(|source| GaleError::SpawnFailed {
        cmd: cmd.to_string(),
        source,
    })?;
    std::process::exit(status.code().unwrap_or(1));
}
