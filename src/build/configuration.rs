// src/build/configuration.rs

use std::path::{Path, PathBuf};

use tracing::info;

use crate::data::{BoardId, ProjectId, TargetId};
use crate::errors::{GaleError, Result};
use crate::exec::{CmdMode, CmdRequest, CommandRunner};
use crate::workspace::{Workspace, source_environment};

use super::build_cache::{BuildCache, BuildType, triplet};

/// File (inside the target build dir) holding the latest extra build args.
pub const BUILD_ARGS_FILE: &str = "build_args.txt";

/// A `west build` invocation.
#[derive(Debug, Clone)]
pub struct WestBuild<'a> {
    pub source_dir: &'a Path,
    pub build_dir: &'a Path,
    pub cmake_target: &'a str,
    pub west_board: &'a str,
    pub pristine: bool,
    pub cmake_only: bool,
    /// Passed to CMake after `--`.
    pub args: &'a [String],
}

impl WestBuild<'_> {
    pub fn command(&self) -> String {
        let mut cmd = format!(
            "west build -s {} -d {} -t {} -b {} --sysbuild",
            self.source_dir.display(),
            self.build_dir.display(),
            self.cmake_target,
            self.west_board,
        );
        if self.pristine {
            cmd.push_str(" --pristine");
        }
        if self.cmake_only {
            cmd.push_str(" --cmake-only");
        }
        cmd.push_str(" --");
        if !self.args.is_empty() {
            cmd.push(' ');
            cmd.push_str(&self.args.join(" "));
        }
        cmd
    }
}

/// Knobs for [`Configuration::build`].
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub extra_args: Vec<String>,
    pub pristine: bool,
    pub cmake_only: bool,
    /// Append the args cached by the previous build.
    pub load_args_from_disk: bool,
    /// Cache `extra_args` for later rebuilds.
    pub save_args_to_disk: bool,
}

/// One (board, target, build type) combination and where it builds.
#[derive(Debug, Clone)]
pub struct Configuration {
    workspace: Workspace,
    board: BoardId,
    target: TargetId,
    build_type: BuildType,
    triplet: String,
    root_build_dir: PathBuf,
    target_build_dir: PathBuf,
}

impl Configuration {
    pub fn new(workspace: &Workspace, board: BoardId, target: TargetId, build_type: BuildType) -> Self {
        let triplet = triplet(board, target, build_type);
        let root_build_dir = target.project().dir(workspace).join("build").join(&triplet);
        let target_build_dir = match target.build_subdir() {
            Some(sub) => root_build_dir.join(sub),
            None => root_build_dir.clone(),
        };
        Self {
            workspace: workspace.clone(),
            board,
            target,
            build_type,
            triplet,
            root_build_dir,
            target_build_dir,
        }
    }

    pub fn triplet(&self) -> &str {
        &self.triplet
    }

    /// Directory handed to `west build -d`.
    pub fn root_build_dir(&self) -> &Path {
        &self.root_build_dir
    }

    /// Build directory of the target image itself.
    pub fn target_build_dir(&self) -> &Path {
        &self.target_build_dir
    }

    pub fn build_args_file(&self) -> PathBuf {
        self.target_build_dir.join(BUILD_ARGS_FILE)
    }

    /// Build the target and return its build cache.
    pub async fn build(&self, runner: &dyn CommandRunner, options: BuildOptions) -> Result<BuildCache> {
        if options.load_args_from_disk && options.save_args_to_disk {
            return Err(GaleError::ConfigError(
                "cannot load and save build arguments in the same build".to_string(),
            ));
        }

        source_environment(&self.board.env_file(&self.workspace)?)?;

        let mut args = options.extra_args.clone();
        args.extend(self.build_type_args());
        if options.load_args_from_disk {
            args.extend(self.load_cached_build_args()?);
        }

        let source_dir = self.target.project().dir(&self.workspace);
        let cmd = WestBuild {
            source_dir: &source_dir,
            build_dir: &self.root_build_dir,
            cmake_target: self.target.cmake_target(),
            west_board: self.board.west_board(),
            pristine: options.pristine,
            cmake_only: options.cmake_only,
            args: &args,
        }
        .command();

        runner
            .run_command(CmdRequest::new(
                cmd,
                format!(
                    "Building target '{}' for board '{}'",
                    self.target.name(),
                    self.board.name()
                ),
                CmdMode::Foreground,
            ))
            .await?;

        if options.save_args_to_disk {
            self.save_build_args(&options.extra_args)?;
        }

        self.build_cache()
    }

    /// Build cache of a previous build; fails if the target was never built.
    pub fn build_cache(&self) -> Result<BuildCache> {
        BuildCache::load(self.board, self.target, self.build_type, &self.target_build_dir)
    }

    fn build_type_args(&self) -> Vec<String> {
        match self.build_type {
            BuildType::Default => Vec::new(),
            BuildType::Sca => {
                let codechecker_dir = ProjectId::Shared
                    .dir(&self.workspace)
                    .join("share")
                    .join("codechecker");
                // CMake list separator; the analyze options cannot contain spaces.
                let analyze_opts = format!("--skip={};", codechecker_dir.join("skipfile.txt").display());
                vec![
                    "-DZEPHYR_SCA_VARIANT=codechecker".to_string(),
                    format!("-DCODECHECKER_NAME={}", self.target.name()),
                    format!(
                        "-DCODECHECKER_CONFIG_FILE={}",
                        codechecker_dir.join(".codechecker.json").display()
                    ),
                    format!("-DCODECHECKER_ANALYZE_OPTS='{analyze_opts}'"),
                    "-DCODECHECKER_PARSE_SKIP=1".to_string(),
                ]
            }
        }
    }

    fn save_build_args(&self, args: &[String]) -> Result<()> {
        let file = self.build_args_file();
        crate::fs::write(&file, &args.join(" "))?;
        info!("Cached build arguments into {}", file.display());
        Ok(())
    }

    fn load_cached_build_args(&self) -> Result<Vec<String>> {
        let file = self.build_args_file();
        if !file.is_file() {
            info!("Build arguments file not found: {}", file.display());
            return Ok(Vec::new());
        }
        let args: Vec<String> = crate::fs::read_to_string(&file)?
            .split_whitespace()
            .map(str::to_string)
            .collect();
        info!("Loaded build arguments from {}: {:?}", file.display(), args);
        Ok(args)
    }
}
