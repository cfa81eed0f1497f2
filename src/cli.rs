// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::data::{BoardId, ProjectId, TargetId};

/// Command-line arguments for `gale`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "gale",
    version,
    about = "Workspace management tool for Gale.",
    long_about = None
)]
pub struct CliArgs {
    /// Print out debug-level messages.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `-v`, `GALE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Path to the config file (TOML).
    ///
    /// Default: `gale.toml` in the manifest directory; missing means defaults.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Install development dependencies for building, flashing, etc.
    Setup,

    /// Checkout the given branch in all user (non-upstream) repositories.
    Checkout {
        branch: String,
    },

    /// Commit and push local changes in all user (non-upstream) repositories.
    Push {
        message: String,
    },

    /// Build a target for a board. Extra args (after `--`) are passed to
    /// CMake and cached for later rebuilds.
    Build {
        #[command(flatten)]
        selection: TargetSelection,

        /// Pass `--pristine` to `west build`.
        #[arg(long)]
        pristine: bool,

        #[arg(last = true, value_name = "ARGS")]
        extra_args: Vec<String>,
    },

    /// Run a built target: natively for BabbleSim boards, flashed otherwise.
    /// Extra args (after `--`) are passed to the BabbleSim executable.
    Run {
        #[command(flatten)]
        selection: TargetSelection,

        /// Rebuild first, re-applying the cached build args.
        #[arg(long)]
        rebuild: bool,

        /// Run under gdb.
        #[arg(long)]
        gdb: bool,

        /// Pace the simulation to wall-clock time.
        #[arg(long)]
        real_time: bool,

        #[arg(last = true, value_name = "ARGS")]
        extra_args: Vec<String>,
    },

    /// Debug a built target with gdb.
    Debug {
        #[command(flatten)]
        selection: TargetSelection,

        /// Rebuild first, re-applying the cached build args.
        #[arg(long)]
        rebuild: bool,
    },

    /// Attach a serial monitor (picocom) to a port.
    Monitor {
        /// Serial device, e.g. /dev/ttyACM0 or /dev/pts/3.
        #[arg(long)]
        port: String,

        /// Baud rate; defaults to `[monitor].baud`.
        #[arg(long)]
        baud: Option<u32>,

        /// Open the monitor in a new terminal window.
        #[arg(long)]
        new_terminal: bool,
    },

    /// Build any CMake target of a project with `west build`.
    Cmake {
        #[arg(long, value_enum)]
        board: BoardId,

        #[arg(long, value_enum)]
        project: ProjectId,

        /// CMake target name.
        #[arg(long)]
        target: String,

        #[arg(long)]
        pristine: bool,

        #[arg(last = true, value_name = "ARGS")]
        extra_args: Vec<String>,
    },

    /// Analyze a target with CodeChecker and open the results.
    Sca {
        #[command(flatten)]
        selection: TargetSelection,
    },

    /// Inspect binary descriptors of a built target (`west bindesc`).
    Bindesc {
        #[command(flatten)]
        selection: TargetSelection,

        /// bindesc subcommand; defaults to `dump`.
        command: Option<String>,
    },
}

/// `--board` + `--target`.
#[derive(Debug, Clone, clap::Args)]
pub struct TargetSelection {
    /// Determines which board's environment file (overlays, Kconfig) is used.
    #[arg(long, value_enum)]
    pub board: BoardId,

    /// Determines which CMake target is built/run; its project follows from it.
    #[arg(long, value_enum)]
    pub target: TargetId,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
