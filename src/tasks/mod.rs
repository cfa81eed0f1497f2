// src/tasks/mod.rs

//! The operations behind each `gale` subcommand.
//!
//! Tasks only describe *what* to run; every external command goes through
//! the [`CommandRunner`] in the [`TaskContext`], so tests can record the
//! commands instead of running them.

pub mod bindesc;
pub mod build;
pub mod cmake;
pub mod git;
pub mod monitor;
pub mod run;
pub mod sca;
pub mod setup;

use crate::config::GaleConfig;
use crate::exec::CommandRunner;
use crate::workspace::Workspace;

pub use bindesc::bindesc;
pub use build::build;
pub use cmake::{CmakeArgs, cmake};
pub use git::{checkout, push};
pub use monitor::{MonitorArgs, monitor};
pub use run::{RunArgs, debug, run};
pub use sca::sca;
pub use setup::setup;

/// Everything a task needs.
#[derive(Clone, Copy)]
pub struct TaskContext<'a> {
    pub runner: &'a dyn CommandRunner,
    pub workspace: &'a Workspace,
    pub config: &'a GaleConfig,
}

impl<'a> TaskContext<'a> {
    pub fn new(runner: &'a dyn CommandRunner, workspace: &'a Workspace, config: &'a GaleConfig) -> Self {
        Self {
            runner,
            workspace,
            config,
        }
    }
}
