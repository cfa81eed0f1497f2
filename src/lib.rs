// src/lib.rs

pub mod bsim;
pub mod build;
pub mod cli;
pub mod config;
pub mod data;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod net;
pub mod tasks;
pub mod workspace;

use tracing::{debug, warn};

use crate::cli::{CliArgs, Command};
use crate::config::{GaleConfig, load_and_validate, load_or_default};
use crate::errors::Result;
use crate::exec::{Executor, interrupted};
use crate::tasks::{CmakeArgs, MonitorArgs, RunArgs, TaskContext};
use crate::workspace::Workspace;

/// High-level entry point used by `main.rs`.
///
/// Runs the requested subcommand and, on success, waits for still-running
/// background commands; on failure they are shut down before the error is
/// returned. A Ctrl-C at any point abandons the subcommand, so nothing new
/// is started, terminates every tracked command and returns `Ok`.
pub async fn run(args: CliArgs) -> anyhow::Result<()> {
    let executor = Executor::new();

    let session = async {
        let result = dispatch(&executor, args).await;
        if result.is_ok() {
            executor.join_all().await;
        }
        result
    };

    tokio::select! {
        result = session => {
            if let Err(e) = result {
                executor.shutdown().await;
                return Err(e.into());
            }
            Ok(())
        }
        () = interrupted() => {
            warn!("Received interrupt. Terminating ongoing processes...");
            executor.shutdown().await;
            Ok(())
        }
    }
}

async fn dispatch(executor: &Executor, args: CliArgs) -> Result<()> {
    debug!(command = ?args.command, "Running command");

    let workspace = Workspace::discover(executor).await?;
    executor.set_workspace_root(workspace.topdir());

    let config = load_config(&args, &workspace)?;
    executor.set_terminal_launcher(config.terminal_launcher());

    let ctx = TaskContext::new(executor, &workspace, &config);
    match args.command {
        Command::Setup => tasks::setup(ctx).await,
        Command::Checkout { branch } => tasks::checkout(ctx, &branch).await,
        Command::Push { message } => tasks::push(ctx, &message).await,
        Command::Build {
            selection,
            pristine,
            extra_args,
        } => tasks::build(ctx, selection.board, selection.target, pristine, extra_args).await,
        Command::Run {
            selection,
            rebuild,
            gdb,
            real_time,
            extra_args,
        } => {
            tasks::run(
                ctx,
                RunArgs {
                    board: selection.board,
                    target: selection.target,
                    rebuild,
                    gdb,
                    real_time,
                    extra_args,
                },
            )
            .await
        }
        Command::Debug { selection, rebuild } => {
            tasks::debug(ctx, selection.board, selection.target, rebuild).await
        }
        Command::Monitor {
            port,
            baud,
            new_terminal,
        } => {
            tasks::monitor(
                ctx,
                MonitorArgs {
                    port,
                    baud,
                    new_terminal,
                },
            )
            .await
        }
        Command::Cmake {
            board,
            project,
            target,
            pristine,
            extra_args,
        } => {
            tasks::cmake(
                ctx,
                CmakeArgs {
                    board,
                    project,
                    target,
                    pristine,
                    extra_args,
                },
            )
            .await
        }
        Command::Sca { selection } => tasks::sca(ctx, selection.board, selection.target).await,
        Command::Bindesc { selection, command } => {
            tasks::bindesc(ctx, selection.board, selection.target, command.as_deref()).await
        }
    }
}

/// An explicit `--config` must exist; the default location is optional.
fn load_config(args: &CliArgs, workspace: &Workspace) -> Result<GaleConfig> {
    match &args.config {
        Some(path) => load_and_validate(path),
        None => load_or_default(workspace.config_path()),
    }
}
