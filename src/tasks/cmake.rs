// src/tasks/cmake.rs

use crate::build::WestBuild;
use crate::data::{BoardId, ProjectId};
use crate::errors::Result;
use crate::exec::{CmdMode, CmdRequest};
use crate::workspace::source_environment;

use super::TaskContext;

#[derive(Debug, Clone)]
pub struct CmakeArgs {
    pub board: BoardId,
    pub project: ProjectId,
    /// Any CMake target defined by the project.
    pub target: String,
    pub pristine: bool,
    pub extra_args: Vec<String>,
}

/// Build an arbitrary CMake target of a project. The build directory is
/// `<project>/build/<board>:<project>:<target>`.
pub async fn cmake(ctx: TaskContext<'_>, args: CmakeArgs) -> Result<()> {
    source_environment(&args.board.env_file(ctx.workspace)?)?;

    let source_dir = args.project.dir(ctx.workspace);
    let build_dir = source_dir.join("build").join(format!(
        "{}:{}:{}",
        args.board.name(),
        args.project.name(),
        args.target
    ));
    let cmd = WestBuild {
        source_dir: &source_dir,
        build_dir: &build_dir,
        cmake_target: &args.target,
        west_board: args.board.west_board(),
        pristine: args.pristine,
        cmake_only: false,
        args: &args.extra_args,
    }
    .command();

    ctx.runner
        .run_command(CmdRequest::new(
            cmd,
            format!(
                "Building CMake target '{}' of project '{}' for board '{}'",
                args.target, args.project, args.board
            ),
            CmdMode::Foreground,
        ))
        .await?;
    Ok(())
}
