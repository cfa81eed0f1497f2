// src/tasks/git.rs

//! Multi-repository git helpers. Each user project is handled on its own;
//! a failure in one repository does not stop the others.

use tracing::{info, warn};

use crate::data::ProjectId;
use crate::errors::Result;
use crate::exec::{CmdMode, CmdRequest};

use super::TaskContext;

pub fn checkout_command(branch: &str) -> String {
    let branch = shell_words::quote(branch);
    format!("git fetch && git switch {branch} || git switch --track origin/{branch}")
}

pub fn push_command(message: &str) -> String {
    format!(
        "git add . && git commit -m {} && git push",
        shell_words::quote(message)
    )
}

/// Check out `branch` in every user project.
pub async fn checkout(ctx: TaskContext<'_>, branch: &str) -> Result<()> {
    info!("Checking out branch '{branch}' in all gale repositories...");
    for_each_user_project(ctx, &checkout_command(branch), "Checking out branch").await
}

/// Commit and push local changes in every user project.
pub async fn push(ctx: TaskContext<'_>, message: &str) -> Result<()> {
    info!("Committing and pushing changes in all gale repositories...");
    for_each_user_project(ctx, &push_command(message), "Committing and pushing").await
}

async fn for_each_user_project(ctx: TaskContext<'_>, cmd: &str, what: &str) -> Result<()> {
    for project in ProjectId::user_projects() {
        let request = CmdRequest::new(cmd, format!("{what} in '{project}'"), CmdMode::Foreground)
            .cwd(project.dir(ctx.workspace))
            .fatal(false);
        match ctx.runner.run_command(request).await {
            Ok(handle) if handle.code() != 0 => {
                warn!(project = %project, code = handle.code(), "{what} failed: {}", handle.stdout());
            }
            Ok(_) => {}
            Err(e) => warn!(project = %project, "{what} failed: {e}"),
        }
    }
    Ok(())
}
