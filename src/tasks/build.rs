// src/tasks/build.rs

use tracing::info;

use crate::build::{BuildOptions, BuildType, Configuration};
use crate::data::{BoardId, TargetId};
use crate::errors::Result;

use super::TaskContext;

/// Build `target` for `board`, caching `extra_args` for later rebuilds.
pub async fn build(
    ctx: TaskContext<'_>,
    board: BoardId,
    target: TargetId,
    pristine: bool,
    extra_args: Vec<String>,
) -> Result<()> {
    let conf = Configuration::new(ctx.workspace, board, target, BuildType::Default);
    let cache = conf
        .build(
            ctx.runner,
            BuildOptions {
                extra_args,
                pristine,
                save_args_to_disk: true,
                ..BuildOptions::default()
            },
        )
        .await?;
    info!(triplet = %cache.triplet, dir = %cache.build_dir.display(), "Build finished");
    Ok(())
}
