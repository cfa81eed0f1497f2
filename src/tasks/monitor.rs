// src/tasks/monitor.rs

use crate::errors::Result;
use crate::exec::{CmdMode, CmdRequest};

use super::TaskContext;

#[derive(Debug, Clone)]
pub struct MonitorArgs {
    /// Serial device, e.g. `/dev/ttyACM0` or a BabbleSim `/dev/pts/N`.
    pub port: String,
    /// Falls back to `[monitor].baud`.
    pub baud: Option<u32>,
    /// Open in a new terminal window instead of taking over this one.
    pub new_terminal: bool,
}

pub fn monitor_command(port: &str, baud: u32) -> String {
    format!("picocom --quiet -b {baud} {port}")
}

/// Attach a serial monitor to `port`.
pub async fn monitor(ctx: TaskContext<'_>, args: MonitorArgs) -> Result<()> {
    let baud = args.baud.unwrap_or(ctx.config.monitor.baud);
    let mode = if args.new_terminal {
        CmdMode::SpawnNewTerminal
    } else {
        CmdMode::Replace
    };
    ctx.runner
        .run_command(CmdRequest::new(
            monitor_command(&args.port, baud),
            format!("Monitoring {}", args.port),
            mode,
        ))
        .await?;
    Ok(())
}
