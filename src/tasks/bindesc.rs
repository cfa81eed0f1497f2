// src/tasks/bindesc.rs

use crate::build::{BuildType, Configuration};
use crate::data::{BoardId, TargetId};
use crate::errors::Result;
use crate::exec::{CmdMode, CmdRequest};

use super::TaskContext;

pub const DEFAULT_BINDESC_COMMAND: &str = "dump";

/// Inspect the binary descriptors of a built target with `west bindesc`.
pub async fn bindesc(
    ctx: TaskContext<'_>,
    board: BoardId,
    target: TargetId,
    command: Option<&str>,
) -> Result<()> {
    let conf = Configuration::new(ctx.workspace, board, target, BuildType::Default);
    let cache = conf.build_cache()?;
    let binary = cache.cmake_cache.bin_path()?;
    let command = command.unwrap_or(DEFAULT_BINDESC_COMMAND);

    ctx.runner
        .run_command(
            CmdRequest::new(
                format!("west bindesc {command} {}", binary.display()),
                format!("Reading binary descriptors of '{target}'"),
                CmdMode::Foreground,
            )
            .cwd(&cache.build_dir),
        )
        .await?;
    Ok(())
}
