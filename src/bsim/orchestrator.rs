// src/bsim/orchestrator.rs

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::build::BuildCache;
use crate::data::ProjectId;
use crate::errors::{GaleError, Result};
use crate::exec::{CmdMode, CmdRequest, CommandRunner};
use crate::workspace::Workspace;

/// Printed on the app's UARTs while it waits under gdb; gdb owns the
/// terminal so the UART has to be attached from somewhere else.
const GDB_UART_ATTACH_CMD: &str =
    r"echo App\ halted\ until\ UART\ attached!\ Use:\ gale\ monitor\ --port\ %s";

/// Opens a monitor on each UART as soon as the app creates it.
const UART_ATTACH_CMD: &str = "gale monitor --port %s --new-terminal";

/// Zephyr's CTF metadata, relative to the zephyr project.
const TRACE_METADATA: &str = "subsys/tracing/ctf/tsdl/metadata";

#[derive(Debug, Clone)]
pub struct BsimOptions {
    /// Run the app under gdb (TUI) in its own terminal.
    pub gdb: bool,
    /// Pace the simulation to wall-clock time with the handbrake device.
    pub real_time: bool,
    /// Write CTF trace data into the results directory.
    pub tracing: bool,
    /// Handbrake poke period; also the app's max resync offset.
    pub handbrake_interval_ns: u64,
    /// Appended to the app device's command line.
    pub extra_args: Vec<String>,
}

impl Default for BsimOptions {
    fn default() -> Self {
        Self {
            gdb: false,
            real_time: false,
            tracing: true,
            handbrake_interval_ns: 5_000,
            extra_args: Vec::new(),
        }
    }
}

/// Per-build directory the simulation runs from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDir {
    pub root: PathBuf,
    pub bin: PathBuf,
    pub lib: PathBuf,
    pub results: PathBuf,
}

impl RunDir {
    /// `<project_dir>/bsim/<triplet>`.
    pub fn new(project_dir: &Path, triplet: &str) -> Self {
        let root = project_dir.join("bsim").join(triplet);
        Self {
            bin: root.join("bin"),
            lib: root.join("lib"),
            results: root.join("results"),
            root,
        }
    }

    /// Create the directories and copy the BabbleSim `bin/` and `lib/`
    /// trees from `bsim_out`, overwriting earlier copies.
    pub fn stage(&self, bsim_out: &Path) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::create_dir_all(&self.results)?;

        debug!("Preparing to run executable inside {}", self.bin.display());
        let bins = crate::fs::copy_tree(&bsim_out.join("bin"), &self.bin)?;
        let libs = crate::fs::copy_tree(&bsim_out.join("lib"), &self.lib)?;
        debug!(bins, libs, "BabbleSim tools staged");
        Ok(())
    }
}

/// Devices sharing one simulation id. Device numbers are handed out in
/// launch order and the PHY is told how many there are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simulation {
    id: String,
    devices: u32,
}

impl Simulation {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            devices: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn device_count(&self) -> u32 {
        self.devices
    }

    /// Number for the next device.
    pub fn add_device(&mut self) -> u32 {
        let n = self.devices;
        self.devices += 1;
        n
    }
}

/// Run a BabbleSim build of `cache.target` natively.
///
/// 1. Stage the run directory (BabbleSim bin/lib, app executable).
/// 2. Prepare tracing, flash files and real-time pacing arguments.
/// 3. Launch the app device: under gdb in a new terminal, or in the
///    background with its UARTs attached to monitors.
/// 4. Launch the handbrake device when running in real time.
/// 5. Run the PHY in the foreground; this is the simulation proper.
///
/// Every command runs from the staged `bin/` directory.
pub async fn run_app_in_bsim(
    runner: &dyn CommandRunner,
    workspace: &Workspace,
    cache: &BuildCache,
    options: &BsimOptions,
) -> Result<()> {
    let flash = cache
        .board
        .flash_layout()
        .ok_or_else(|| GaleError::NotBsimBoard(cache.board.name().to_string()))?;

    let exe = cache.cmake_cache.exe_path()?;
    if !exe.is_file() {
        return Err(GaleError::MissingBinary(exe));
    }
    let bsim_out = cache.cmake_cache.bsim_out_path()?;

    let run_dir = RunDir::new(&cache.target.project().dir(workspace), &cache.triplet);
    run_dir.stage(&bsim_out)?;

    debug!("Copying executable from {}", exe.display());
    let final_exe = crate::fs::copy_file_into(&exe, &run_dir.bin)?;

    let mut common_args = Vec::new();
    if options.tracing {
        let metadata = ProjectId::Zephyr.dir(workspace).join(TRACE_METADATA);
        crate::fs::copy_file(&metadata, &run_dir.results.join("metadata"))?;
        common_args.push(format!("--trace-file={}/trace_data", run_dir.results.display()));
    }
    common_args.extend(flash.args(&run_dir.results));
    if options.real_time {
        common_args.push(format!("--mro={}", options.handbrake_interval_ns));
    }
    common_args.extend(options.extra_args.iter().cloned());
    let common_args = common_args.join(" ");

    let mut sim = Simulation::new(cache.target.name());
    let device_desc = format!("Running target '{}' device in BabbleSim", cache.target.name());

    if options.gdb {
        let gdbinit = ProjectId::Shared
            .dir(workspace)
            .join("share")
            .join("gdb")
            .join(".gdbconf");
        let uart_args = format!(
            "--uart_pty_wait --uart0_pty_attach_cmd=\"{GDB_UART_ATTACH_CMD}\" --uart1_pty_attach_cmd=\"{GDB_UART_ATTACH_CMD}\""
        );
        let device = sim.add_device();
        let cmd = format!(
            "{} --tui -x {} --args {} -s={} -d={} {} {}",
            cache.cmake_cache.gdb()?,
            gdbinit.display(),
            final_exe.display(),
            sim.id(),
            device,
            uart_args,
            common_args,
        );
        runner
            .run_command(
                CmdRequest::new(cmd, device_desc, CmdMode::SpawnNewTerminal).cwd(&run_dir.bin),
            )
            .await?;
    } else {
        let uart_args = format!(
            "--uart_pty_wait --uart1_pty_attach_cmd=\"{UART_ATTACH_CMD}\" --uart4_pty_attach_cmd=\"{UART_ATTACH_CMD}\""
        );
        let device = sim.add_device();
        let cmd = format!(
            "{} -s={} -d={} {} {}",
            final_exe.display(),
            sim.id(),
            device,
            uart_args,
            common_args,
        );
        runner
            .run_command(CmdRequest::new(cmd, device_desc, CmdMode::Background).cwd(&run_dir.bin))
            .await?;
    }

    if options.real_time {
        let device = sim.add_device();
        let cmd = format!(
            "./bs_device_handbrake -s={} -d={} --pp={}",
            sim.id(),
            device,
            options.handbrake_interval_ns
        );
        runner
            .run_command(
                CmdRequest::new(cmd, "Running handbrake device in BabbleSim", CmdMode::Background)
                    .cwd(&run_dir.bin),
            )
            .await?;
    }

    info!(sim_id = %sim.id(), devices = sim.device_count(), "Starting simulation");
    let cmd = format!("./bs_2G4_phy_v1 -s={} -D={}", sim.id(), sim.device_count());
    runner
        .run_command(CmdRequest::new(cmd, "Starting BabbleSim PHY", CmdMode::Foreground).cwd(&run_dir.bin))
        .await?;

    Ok(())
}
