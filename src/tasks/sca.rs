// src/tasks/sca.rs

use tracing::info;

use crate::build::{BuildOptions, BuildType, Configuration};
use crate::data::{BoardId, TargetId};
use crate::errors::{GaleError, Result};
use crate::exec::{CmdMode, CmdRequest};
use crate::net::wait_for_port;

use super::TaskContext;

/// Command that opens a URL in the default browser.
pub fn open_url_command(url: &str) -> String {
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(windows) {
        "start"
    } else {
        "xdg-open"
    };
    format!("{opener} {url}")
}

/// Analyze a target with CodeChecker.
///
/// 1. Pristine SCA build (re-applying cached build args).
/// 2. Start the CodeChecker server in a new terminal and wait for its port.
/// 3. Store the analysis results on the server.
/// 4. Open the server in a browser.
pub async fn sca(ctx: TaskContext<'_>, board: BoardId, target: TargetId) -> Result<()> {
    let conf = Configuration::new(ctx.workspace, board, target, BuildType::Sca);
    let cache = conf
        .build(
            ctx.runner,
            BuildOptions {
                pristine: true,
                load_args_from_disk: true,
                ..BuildOptions::default()
            },
        )
        .await?;
    let codechecker = cache.cmake_cache.codechecker_exe()?;
    let port = ctx.config.sca.port;

    ctx.runner
        .run_command(
            CmdRequest::new(
                format!("{codechecker} server"),
                "Starting CodeChecker server",
                CmdMode::SpawnNewTerminal,
            )
            .cwd(&cache.build_dir),
        )
        .await?;

    if !wait_for_port(port, ctx.config.sca.startup_timeout()).await {
        return Err(GaleError::Other(anyhow::anyhow!(
            "CodeChecker server failed to start (nothing listening on port {port})"
        )));
    }
    info!(port, "CodeChecker server started");

    let plist = cache
        .build_dir
        .join("sca")
        .join("codechecker")
        .join("codechecker.plist");
    ctx.runner
        .run_command(
            CmdRequest::new(
                format!("{codechecker} store {} -n {}", plist.display(), target.name()),
                "Storing analysis results into CodeChecker server",
                CmdMode::Foreground,
            )
            .cwd(&cache.build_dir),
        )
        .await?;

    ctx.runner
        .run_command(
            CmdRequest::new(
                open_url_command(&format!("http://localhost:{port}")),
                "Opening CodeChecker in browser",
                CmdMode::Foreground,
            )
            .cwd(&cache.build_dir),
        )
        .await?;
    Ok(())
}
