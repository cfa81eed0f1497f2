#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use gale::build::{BuildType, Configuration};
use gale::data::{BoardId, TargetId};
use gale::workspace::Workspace;
use tempfile::TempDir;

const BOARDS: [BoardId; 3] = [BoardId::Nrf54l15Dk, BoardId::Nrf54l15Bsim, BoardId::Nrf5340Bsim];

/// A throwaway west workspace on disk:
///
/// ```text
/// <tmp>/gale/projects/shared/boards/<board>/environment
/// <tmp>/gale/projects/shared/share/gdb/.gdbconf
/// <tmp>/gale/projects/zephyr/subsys/tracing/ctf/tsdl/metadata
/// <tmp>/bsim_out/{bin,lib}/...
/// ```
pub struct FakeWorkspace {
    dir: TempDir,
    workspace: Workspace,
}

impl FakeWorkspace {
    pub fn new() -> Result<Self> {
        let dir = TempDir::new()?;
        let workspace = Workspace::new(dir.path());

        let shared = workspace.projects_dir().join("shared");
        for board in BOARDS {
            write_file(
                &shared.join("boards").join(board.name()).join("environment"),
                &format!("GALE_TEST_BOARD_{}={}\n", board.name().to_uppercase(), board.name()),
            )?;
        }
        write_file(&shared.join("share/gdb/.gdbconf"), "set pagination off\n")?;
        write_file(
            &workspace
                .projects_dir()
                .join("zephyr/subsys/tracing/ctf/tsdl/metadata"),
            "/* CTF 1.8 */\n",
        )?;

        let bsim_out = dir.path().join("bsim_out");
        write_file(&bsim_out.join("bin/bs_2G4_phy_v1"), "#!/bin/sh\n")?;
        write_file(&bsim_out.join("bin/bs_device_handbrake"), "#!/bin/sh\n")?;
        write_file(&bsim_out.join("lib/libUtilv1.so"), "")?;
        write_file(&bsim_out.join("lib/hw_models/libnrf.so"), "")?;

        Ok(Self { dir, workspace })
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn topdir(&self) -> &Path {
        self.dir.path()
    }

    pub fn bsim_out(&self) -> PathBuf {
        self.dir.path().join("bsim_out")
    }

    /// Lay out a finished build: the target build dir, an app executable
    /// and a `CMakeCache.txt` pointing at them. Returns the build dir.
    pub fn write_build(&self, board: BoardId, target: TargetId, build_type: BuildType) -> Result<PathBuf> {
        let conf = Configuration::new(&self.workspace, board, target, build_type);
        let build_dir = conf.target_build_dir().to_path_buf();

        let exe = build_dir.join("zephyr/zephyr.exe");
        let bin = build_dir.join("zephyr/zephyr.bin");
        write_file(&exe, "app")?;
        write_file(&bin, "bin")?;

        let cache = format!(
            "# This is the CMakeCache file.\n\
             //Path to gdb\n\
             CMAKE_GDB:FILEPATH=/usr/bin/gdb\n\
             ZEPHYR_BASE:PATH={zephyr}\n\
             BYPRODUCT_KERNEL_EXE_NAME:FILEPATH={exe}\n\
             BYPRODUCT_KERNEL_ELF_NAME:FILEPATH={elf}\n\
             BYPRODUCT_KERNEL_BIN_NAME:FILEPATH={bin}\n\
             BSIM_OUT_PATH:PATH={bsim}\n\
             CODECHECKER_EXE:FILEPATH=/usr/bin/CodeChecker\n\
             EMPTY_VALUE:STRING=\n",
            zephyr = self.workspace.projects_dir().join("zephyr").display(),
            exe = exe.display(),
            elf = build_dir.join("zephyr/zephyr.elf").display(),
            bin = bin.display(),
            bsim = self.bsim_out().display(),
        );
        write_file(&build_dir.join("CMakeCache.txt"), &cache)?;
        Ok(build_dir)
    }
}

pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}
