// src/exec/handle.rs

//! Tracked record of one external process invocation.

use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::mode::CmdMode;

#[cfg(unix)]
const SIGINT: i32 = nix::sys::signal::Signal::SIGINT as i32;
#[cfg(unix)]
const SIGTERM: i32 = nix::sys::signal::Signal::SIGTERM as i32;
#[cfg(unix)]
const SIGKILL: i32 = nix::sys::signal::Signal::SIGKILL as i32;

#[cfg(not(unix))]
const SIGINT: i32 = 2;
#[cfg(not(unix))]
const SIGTERM: i32 = 15;
#[cfg(not(unix))]
const SIGKILL: i32 = 9;

/// Exit code recorded for a worker that had to be aborted during shutdown.
pub const KILLED_CODE: i32 = -SIGKILL;

/// Result of a finished command.
///
/// `stdout` holds the trimmed stdout on success and the trimmed stderr on
/// failure. When nothing was captured it falls back to `"code <n>"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CmdOutcome {
    pub code: i32,
    pub stdout: String,
}

impl CmdOutcome {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// The command was stopped by SIGINT or SIGTERM rather than failing.
    pub fn was_terminated(&self) -> bool {
        is_termination_code(self.code)
    }
}

/// `true` for the negated SIGINT / SIGTERM codes.
pub fn is_termination_code(code: i32) -> bool {
    code == -SIGINT || code == -SIGTERM
}

/// Map an exit status to a single code; death by signal `N` becomes `-N`.
pub(crate) fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }

    -1
}

/// One spawned (or about to be spawned) command.
///
/// Handles are shared between the caller, the worker that owns the child
/// process and the executor's history. `code()`/`stdout()` hold default
/// values until the completion signal fires; the worker records the
/// outcome exactly once.
#[derive(Debug)]
pub struct CmdHandle {
    cmd: String,
    mode: CmdMode,
    cwd: PathBuf,
    pid: Mutex<Option<u32>>,
    worker: Mutex<Option<JoinHandle<()>>>,
    state: watch::Sender<Option<CmdOutcome>>,
}

impl CmdHandle {
    pub fn new(cmd: impl Into<String>, mode: CmdMode, cwd: impl Into<PathBuf>) -> Self {
        let (state, _) = watch::channel(None);
        Self {
            cmd: cmd.into(),
            mode,
            cwd: cwd.into(),
            pid: Mutex::new(None),
            worker: Mutex::new(None),
            state,
        }
    }

    /// A handle whose outcome is already known (detached launches, fakes).
    pub fn completed(
        cmd: impl Into<String>,
        mode: CmdMode,
        cwd: impl Into<PathBuf>,
        code: i32,
        stdout: impl Into<String>,
    ) -> Self {
        let handle = Self::new(cmd, mode, cwd);
        handle.complete(code, stdout.into());
        handle
    }

    pub fn cmd(&self) -> &str {
        &self.cmd
    }

    pub fn mode(&self) -> CmdMode {
        self.mode
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Exit code, or `0` while the command is still running.
    pub fn code(&self) -> i32 {
        self.state.borrow().as_ref().map_or(0, |o| o.code)
    }

    /// Captured output, or an empty string while the command is still running.
    pub fn stdout(&self) -> String {
        self.state
            .borrow()
            .as_ref()
            .map(|o| o.stdout.clone())
            .unwrap_or_default()
    }

    pub fn outcome(&self) -> Option<CmdOutcome> {
        self.state.borrow().clone()
    }

    pub fn is_finished(&self) -> bool {
        self.state.borrow().is_some()
    }

    /// PID of the child process, once one was started.
    pub fn pid(&self) -> Option<u32> {
        *lock(&self.pid)
    }

    /// Wait for the completion signal.
    pub async fn wait(&self) -> CmdOutcome {
        let mut rx = self.state.subscribe();
        match rx.wait_for(Option::is_some).await {
            Ok(state) => state.clone().unwrap_or_default(),
            Err(_) => CmdOutcome::default(),
        }
    }

    /// Wait until a started command has finished, then for its worker task.
    ///
    /// The worker stays reachable through the handle until the outcome is
    /// recorded, so shutdown can still abort it while a caller is joining.
    pub async fn join(&self) {
        if self.pid().is_some() {
            self.wait().await;
        }
        let worker = lock(&self.worker).take();
        if let Some(worker) = worker {
            if let Err(e) = worker.await {
                if !e.is_cancelled() {
                    warn!(cmd = %self.cmd, error = %e, "command worker panicked");
                }
            }
        }
    }

    /// Record the outcome. Returns `false` if an outcome was already set.
    pub(crate) fn complete(&self, code: i32, stdout: String) -> bool {
        self.state.send_if_modified(|state| {
            if state.is_some() {
                return false;
            }
            *state = Some(CmdOutcome { code, stdout });
            true
        })
    }

    pub(crate) fn set_pid(&self, pid: Option<u32>) {
        *lock(&self.pid) = pid;
    }

    pub(crate) fn set_worker(&self, worker: JoinHandle<()>) {
        *lock(&self.worker) = Some(worker);
    }

    /// Ask the child to stop with SIGTERM.
    pub(crate) fn terminate(&self) {
        #[cfg(unix)]
        self.signal(nix::sys::signal::Signal::SIGTERM);

        #[cfg(not(unix))]
        {
            debug!(cmd = %self.cmd, "no SIGTERM on this platform; aborting worker");
            self.abort_worker();
        }
    }

    /// Stop the child unconditionally. The worker still reaps it and records
    /// the outcome.
    pub(crate) fn kill(&self) {
        #[cfg(unix)]
        self.signal(nix::sys::signal::Signal::SIGKILL);

        #[cfg(not(unix))]
        self.abort_worker();
    }

    #[cfg(unix)]
    fn signal(&self, signal: nix::sys::signal::Signal) {
        use nix::sys::signal::kill;
        use nix::unistd::Pid;

        let Some(pid) = self.pid() else {
            return;
        };
        debug!(cmd = %self.cmd, pid, ?signal, "signalling command");
        if let Err(e) = kill(Pid::from_raw(pid as i32), signal) {
            debug!(cmd = %self.cmd, pid, ?signal, error = %e, "signal delivery failed");
        }
    }

    /// Abort the worker; dropping its child kills the process.
    pub(crate) fn abort_worker(&self) {
        if let Some(worker) = lock(&self.worker).as_ref() {
            worker.abort();
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
