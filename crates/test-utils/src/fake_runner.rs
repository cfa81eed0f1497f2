use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use gale::errors::{GaleError, Result};
use gale::exec::{CmdHandle, CmdRequest, CommandRunner, is_termination_code};

/// A fake command runner that:
/// - records every request it receives,
/// - never spawns a process,
/// - answers with canned results (code 0 and empty output by default).
///
/// Like the real executor, a fatal request in a blocking mode whose canned
/// code is non-zero yields `GaleError::CommandFailed`, unless the code says
/// the command was stopped by SIGINT/SIGTERM.
#[derive(Debug, Default)]
pub struct FakeRunner {
    requests: Mutex<Vec<CmdRequest>>,
    responses: Mutex<Vec<(String, i32, String)>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer commands starting with `prefix` with `code` and `stdout`.
    /// Earlier registrations win.
    pub fn respond(self, prefix: &str, code: i32, stdout: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push((prefix.to_string(), code, stdout.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<CmdRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.cmd).collect()
    }

    fn response_for(&self, cmd: &str) -> (i32, String) {
        self.responses
            .lock()
            .unwrap()
            .iter()
            .find(|(prefix, _, _)| cmd.starts_with(prefix.as_str()))
            .map(|(_, code, stdout)| (*code, stdout.clone()))
            .unwrap_or((0, String::new()))
    }
}

impl CommandRunner for FakeRunner {
    fn run_command(
        &self,
        request: CmdRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Arc<CmdHandle>>> + Send + '_>> {
        Box::pin(async move {
            self.requests.lock().unwrap().push(request.clone());

            let (code, stdout) = self.response_for(&request.cmd);
            if code != 0 && !is_termination_code(code) && request.fatal && request.mode.is_blocking() {
                return Err(GaleError::CommandFailed {
                    cmd: request.cmd,
                    code,
                    output: stdout,
                });
            }

            let cwd = request.cwd.clone().unwrap_or_else(|| PathBuf::from("."));
            Ok(Arc::new(CmdHandle::completed(
                request.cmd,
                request.mode,
                cwd,
                code,
                stdout,
            )))
        })
    }
}
