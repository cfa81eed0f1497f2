// src/exec/mod.rs

//! Process execution layer.
//!
//! Every external command gale runs goes through here, using
//! `tokio::process::Command` and one worker task per command.
//!
//! - [`mode`] defines the execution modes and the request type.
//! - [`handle`] holds the per-command record (`CmdHandle`).
//! - [`history`] is the append-only list of every command started.
//! - [`executor`] is the production `Executor`, including interrupt-driven
//!   shutdown.
//! - [`pty`], [`terminal`] and [`replace`] implement the BACKGROUND,
//!   SPAWN_NEW_TERMINAL and REPLACE specifics.
//! - [`backend`] provides the `CommandRunner` trait so callers can be
//!   tested against a fake runner.

pub mod backend;
pub mod executor;
pub mod handle;
pub mod history;
pub mod mode;
pub mod pty;
pub mod replace;
pub mod terminal;

pub use backend::CommandRunner;
pub use executor::{Executor, SHUTDOWN_GRACE, interrupted};
pub use handle::{CmdHandle, CmdOutcome, KILLED_CODE, is_termination_code};
pub use history::CmdHistory;
pub use mode::{CmdMode, CmdRequest};
pub use terminal::TerminalLauncher;
