// src/exec/executor.rs

//! The production command executor.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

use crate::errors::{GaleError, Result};

use super::backend::CommandRunner;
use super::handle::{CmdHandle, CmdOutcome, KILLED_CODE, exit_code};
use super::history::CmdHistory;
use super::mode::{CmdMode, CmdRequest};
use super::pty::PtyPair;
use super::replace;
use super::terminal::{self, TerminalLauncher};

/// How long shutdown waits for a command at each step (before SIGTERM,
/// before SIGKILL and after it).
pub const SHUTDOWN_GRACE: Duration = Duration::from_millis(100);

/// Where the child's stdio goes.
enum Routing<'a> {
    Inherit,
    Piped,
    Pty(&'a PtyPair),
}

/// Runs shell commands and keeps track of every one of them.
///
/// One executor lives for the whole gale invocation. Each command gets its
/// own worker task that owns the child process and records the outcome on
/// the command's handle. The history is what shutdown walks to terminate
/// everything still running; once shutdown has begun no new command starts.
#[derive(Debug, Default)]
pub struct Executor {
    history: CmdHistory,
    workspace_root: OnceLock<PathBuf>,
    terminal: OnceLock<TerminalLauncher>,
    shutting_down: Arc<AtomicBool>,
}

impl Executor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default working directory for requests without an explicit `cwd`.
    /// Can only be set once.
    pub fn set_workspace_root(&self, root: impl Into<PathBuf>) {
        if self.workspace_root.set(root.into()).is_err() {
            debug!("workspace root already set; ignoring");
        }
    }

    pub fn set_terminal_launcher(&self, launcher: TerminalLauncher) {
        if self.terminal.set(launcher).is_err() {
            debug!("terminal launcher already set; ignoring");
        }
    }

    /// Workspace root, or `.` before discovery.
    pub fn workspace_root(&self) -> PathBuf {
        self.workspace_root
            .get()
            .cloned()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn history(&self) -> &CmdHistory {
        &self.history
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::SeqCst)
    }

    fn terminal(&self) -> &TerminalLauncher {
        self.terminal.get_or_init(TerminalLauncher::default)
    }

    /// Run the given command.
    ///
    /// The handle is appended to the history before anything else, so even a
    /// command that fails to start is visible to cleanup. Such a handle is
    /// completed with code `-1` and the error text.
    ///
    /// - A missing working directory is always an error.
    /// - After [`shutdown`](Self::shutdown) has begun, nothing new is started
    ///   and [`GaleError::ShuttingDown`] is returned.
    /// - In blocking modes a non-zero exit becomes
    ///   [`GaleError::CommandFailed`] when `fatal` is set; otherwise the
    ///   handle is returned for inspection.
    /// - Exit by SIGINT/SIGTERM is a warning, never a failure.
    pub async fn run(&self, request: CmdRequest) -> Result<Arc<CmdHandle>> {
        let cwd = request
            .cwd
            .clone()
            .unwrap_or_else(|| self.workspace_root());
        let handle = Arc::new(CmdHandle::new(&request.cmd, request.mode, &cwd));
        self.history.push(Arc::clone(&handle));

        if let Err(e) = self.launch(&request, &cwd, &handle) {
            handle.complete(-1, e.to_string());
            return Err(e);
        }

        if request.mode.is_blocking() {
            handle.join().await;
            check_outcome(&handle, request.fatal)?;
        }
        Ok(handle)
    }

    /// Start the command according to its mode. Blocking modes are joined by
    /// the caller.
    fn launch(&self, request: &CmdRequest, cwd: &Path, handle: &Arc<CmdHandle>) -> Result<()> {
        if self.is_shutting_down() {
            return Err(GaleError::ShuttingDown(request.cmd.clone()));
        }
        if !cwd.is_dir() {
            return Err(GaleError::InvalidWorkingDirectory(cwd.to_path_buf()));
        }

        match request.mode {
            CmdMode::Foreground => {
                info!(
                    desc = %request.desc,
                    cmd = %request.cmd,
                    cwd = %cwd.display(),
                    "Running command in foreground."
                );
                let child = spawn_shell(&request.cmd, cwd, Routing::Inherit)?;
                self.start_worker(handle, child, None, false);
            }
            CmdMode::CaptureResult => {
                debug!(cmd = %request.cmd, "Running command for its stdout value.");
                let child = spawn_shell(&request.cmd, cwd, Routing::Piped)?;
                self.start_worker(handle, child, None, false);
            }
            CmdMode::Background => {
                let pty = PtyPair::open()?;
                let device = pty.device().display().to_string();
                info!(
                    desc = %request.desc,
                    cmd = %request.cmd,
                    cwd = %cwd.display(),
                    device = %device,
                    monitor = %format!("while true; do picocom --quiet {device} || sleep 5; done"),
                    "Running command in background ({device})."
                );
                let child = spawn_shell(&request.cmd, cwd, Routing::Pty(&pty))?;
                self.start_worker(handle, child, Some(pty), request.fatal);
            }
            CmdMode::SpawnNewTerminal => {
                info!(
                    desc = %request.desc,
                    cmd = %request.cmd,
                    cwd = %cwd.display(),
                    "Running command in a new terminal."
                );
                std::env::set_current_dir(cwd)
                    .map_err(|_| GaleError::InvalidWorkingDirectory(cwd.to_path_buf()))?;
                terminal::spawn_detached(self.terminal(), &request.cmd, cwd)?;
                handle.complete(0, String::new());
            }
            CmdMode::Replace => {
                info!(
                    desc = %request.desc,
                    cmd = %request.cmd,
                    cwd = %cwd.display(),
                    "Running command in foreground (replacing gale!)."
                );
                let never = replace::replace_process(&request.cmd, cwd)?;
                match never {}
            }
        }
        Ok(())
    }

    /// Hand the child to its own worker task.
    ///
    /// The worker waits for exit, records the outcome once and fires the
    /// completion signal. `exit_on_failure` is for background commands, whose
    /// fatal failures have no caller left to report to; it is ignored once
    /// shutdown has begun.
    fn start_worker(
        &self,
        handle: &Arc<CmdHandle>,
        child: Child,
        pty: Option<PtyPair>,
        exit_on_failure: bool,
    ) {
        handle.set_pid(child.id());

        let worker_handle = Arc::clone(handle);
        let shutting_down = Arc::clone(&self.shutting_down);
        let worker = tokio::spawn(async move {
            // The pty must outlive the child.
            let _pty = pty;
            let outcome = wait_for_exit(&worker_handle, child).await;

            if outcome.was_terminated() {
                warn!(cmd = %worker_handle.cmd(), "Command `{}` was terminated", worker_handle.cmd());
            } else if !outcome.is_success() {
                debug!(
                    cmd = %worker_handle.cmd(),
                    code = outcome.code,
                    output = %outcome.stdout,
                    "command exited with failure"
                );
                if exit_on_failure && !shutting_down.load(Ordering::SeqCst) {
                    error!(
                        cmd = %worker_handle.cmd(),
                        code = outcome.code,
                        "Cmd `{}` failed: {}",
                        worker_handle.cmd(),
                        outcome.stdout
                    );
                    worker_handle.complete(outcome.code, outcome.stdout);
                    std::process::exit(1);
                }
            }

            worker_handle.complete(outcome.code, outcome.stdout);
        });
        handle.set_worker(worker);
    }

    /// Terminate every tracked command, newest first.
    ///
    /// Stops new commands from starting first. Each still-running command
    /// gets a short grace period, then SIGTERM and another grace period, then
    /// SIGKILL. A worker that still has not recorded an outcome after that is
    /// aborted. Every worker is joined before moving on. Safe to call
    /// repeatedly.
    pub async fn shutdown(&self) {
        self.shutting_down.store(true, Ordering::SeqCst);

        for handle in self.history.newest_first() {
            if handle.pid().is_none() && !handle.is_finished() {
                // Still being launched by another task.
                sleep(SHUTDOWN_GRACE).await;
            }
            if handle.pid().is_some() && !handle.is_finished() {
                if timeout(SHUTDOWN_GRACE, handle.wait()).await.is_err() {
                    handle.terminate();
                    if timeout(SHUTDOWN_GRACE, handle.wait()).await.is_err() {
                        warn!(cmd = %handle.cmd(), "Command ignored SIGTERM; killing it");
                        handle.kill();
                        if timeout(SHUTDOWN_GRACE, handle.wait()).await.is_err() {
                            handle.abort_worker();
                            handle.complete(KILLED_CODE, "killed".to_string());
                        }
                    }
                }
            }
            handle.join().await;
        }
    }

    /// Wait for every command still running (background commands) to exit.
    pub async fn join_all(&self) {
        for handle in self.history.snapshot() {
            if handle.pid().is_some() && !handle.is_finished() {
                info!(cmd = %handle.cmd(), "Waiting for background command to exit");
            }
            handle.join().await;
        }
    }
}

/// Resolves on the first Ctrl-C. Never resolves if the signal cannot be
/// watched.
pub async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

impl CommandRunner for Executor {
    fn run_command(
        &self,
        request: CmdRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Arc<CmdHandle>>> + Send + '_>> {
        Box::pin(self.run(request))
    }
}

/// Build a shell command appropriate for the platform.
fn shell_command(cmd: &str) -> Command {
    if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(cmd);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(cmd);
        c
    }
}

fn spawn_shell(cmd: &str, cwd: &Path, routing: Routing<'_>) -> Result<Child> {
    let mut command = shell_command(cmd);
    command.current_dir(cwd).kill_on_drop(true);

    match routing {
        Routing::Inherit => {}
        Routing::Piped => {
            command
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped());
        }
        Routing::Pty(pty) => {
            let (stdin, stdout, stderr) = pty.child_stdio()?;
            command.stdin(stdin).stdout(stdout).stderr(stderr);
        }
    }

    command.spawn().map_err(|source| GaleError::SpawnFailed {
        cmd: cmd.to_string(),
        source,
    })
}

async fn wait_for_exit(handle: &CmdHandle, child: Child) -> CmdOutcome {
    match child.wait_with_output().await {
        Ok(output) => {
            let code = exit_code(output.status);
            let text = if code == 0 {
                output.stdout
            } else {
                output.stderr
            };
            let text = String::from_utf8_lossy(&text).trim().to_string();
            let stdout = if text.is_empty() {
                format!("code {code}")
            } else {
                text
            };
            CmdOutcome { code, stdout }
        }
        Err(e) => {
            error!(cmd = %handle.cmd(), error = %e, "waiting for command failed");
            CmdOutcome {
                code: -1,
                stdout: e.to_string(),
            }
        }
    }
}

fn check_outcome(handle: &CmdHandle, fatal: bool) -> Result<()> {
    let outcome = handle.outcome().unwrap_or_default();
    if outcome.is_success() || outcome.was_terminated() || !fatal {
        return Ok(());
    }
    Err(GaleError::CommandFailed {
        cmd: handle.cmd().to_string(),
        code: outcome.code,
        output: outcome.stdout,
    })
}
