// src/tasks/run.rs

use crate::bsim::{BsimOptions, run_app_in_bsim};
use crate::build::{BuildCache, BuildOptions, BuildType, Configuration};
use crate::data::{BoardId, TargetId};
use crate::errors::Result;
use crate::exec::{CmdMode, CmdRequest};

use super::TaskContext;

#[derive(Debug, Clone)]
pub struct RunArgs {
    pub board: BoardId,
    pub target: TargetId,
    /// Rebuild first, re-applying the cached build args.
    pub rebuild: bool,
    pub gdb: bool,
    pub real_time: bool,
    /// Passed to the simulated app (BabbleSim boards only).
    pub extra_args: Vec<String>,
}

/// Run a built target: natively for simulation boards, flashed for
/// hardware boards.
pub async fn run(ctx: TaskContext<'_>, args: RunArgs) -> Result<()> {
    let conf = Configuration::new(ctx.workspace, args.board, args.target, BuildType::Default);
    let cache = load_or_rebuild(ctx, &conf, args.rebuild).await?;

    if args.board.is_bsim() {
        let options = BsimOptions {
            gdb: args.gdb,
            real_time: args.real_time,
            tracing: ctx.config.bsim.tracing,
            handbrake_interval_ns: ctx.config.bsim.handbrake_interval_ns,
            extra_args: args.extra_args,
        };
        return run_app_in_bsim(ctx.runner, ctx.workspace, &cache, &options).await;
    }

    let build_dir = conf.root_build_dir().display();
    let request = if args.gdb {
        CmdRequest::new(
            format!("west debug -d {build_dir}"),
            format!("Debugging target '{}'", args.target),
            CmdMode::Replace,
        )
    } else {
        CmdRequest::new(
            format!("west flash -d {build_dir}"),
            format!("Flashing target '{}' to board '{}'", args.target, args.board),
            CmdMode::Foreground,
        )
    };
    ctx.runner.run_command(request).await?;
    Ok(())
}

/// `run` with gdb attached.
pub async fn debug(ctx: TaskContext<'_>, board: BoardId, target: TargetId, rebuild: bool) -> Result<()> {
    run(
        ctx,
        RunArgs {
            board,
            target,
            rebuild,
            gdb: true,
            real_time: false,
            extra_args: Vec::new(),
        },
    )
    .await
}

async fn load_or_rebuild(ctx: TaskContext<'_>, conf: &Configuration, rebuild: bool) -> Result<BuildCache> {
    if !rebuild {
        return conf.build_cache();
    }
    conf.build(
        ctx.runner,
        BuildOptions {
            load_args_from_disk: true,
            ..BuildOptions::default()
        },
    )
    .await
}
