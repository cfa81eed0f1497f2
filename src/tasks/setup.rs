// src/tasks/setup.rs

use tracing::info;

use crate::errors::{GaleError, Result};
use crate::exec::{CmdMode, CmdRequest};

use super::TaskContext;

/// Host tools gale shells out to: serial monitor, debugger, terminal.
pub const SYSTEM_PACKAGES: [&str; 3] = ["picocom", "gdb", "xterm"];

pub fn install_command(packages: &[&str]) -> Result<String> {
    if cfg!(target_os = "linux") {
        Ok(format!("sudo apt install {}", packages.join(" ")))
    } else {
        Err(GaleError::UnsupportedPlatform(format!(
            "don't know how to install packages on {}",
            std::env::consts::OS
        )))
    }
}

/// Install development dependencies.
pub async fn setup(ctx: TaskContext<'_>) -> Result<()> {
    let cmd = install_command(&SYSTEM_PACKAGES)?;
    info!("Installing development dependencies...");
    ctx.runner
        .run_command(CmdRequest::new(
            cmd,
            format!("Installing system packages: {:?}", SYSTEM_PACKAGES),
            CmdMode::Foreground,
        ))
        .await?;
    Ok(())
}
