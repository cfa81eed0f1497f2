// src/exec/backend.rs

//! Pluggable command runner abstraction.
//!
//! Everything that launches external commands (tasks, the BabbleSim
//! orchestrator, workspace discovery) talks to a `CommandRunner` instead of
//! the concrete [`Executor`]. Tests swap in a recording fake that never
//! spawns a process.
//!
//! [`Executor`]: crate::exec::Executor

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::errors::Result;

use super::handle::CmdHandle;
use super::mode::CmdRequest;

/// Trait abstracting how commands are executed.
pub trait CommandRunner: Send + Sync {
    /// Run one command according to `request.mode`.
    ///
    /// Blocking modes resolve once the command finished; BACKGROUND
    /// resolves right after launch with a handle to poll.
    fn run_command(
        &self,
        request: CmdRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Arc<CmdHandle>>> + Send + '_>>;
}
