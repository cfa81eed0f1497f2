// src/build/build_cache.rs

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::data::{BoardId, TargetId};
use crate::errors::{GaleError, Result};

use super::cmake_cache::CMakeCache;

/// What kind of build to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BuildType {
    #[default]
    Default,
    /// Static code analysis with CodeChecker.
    Sca,
}

/// `<board>:<project>:<target>`, with `:sca` appended for SCA builds.
pub fn triplet(board: BoardId, target: TargetId, build_type: BuildType) -> String {
    let base = format!("{}:{}:{}", board.name(), target.project().name(), target.name());
    match build_type {
        BuildType::Default => base,
        BuildType::Sca => format!("{base}:sca"),
    }
}

/// A finished build of one target for one board.
#[derive(Debug, Clone)]
pub struct BuildCache {
    pub board: BoardId,
    pub target: TargetId,
    pub build_type: BuildType,
    /// Uniquely identifies the build configuration.
    pub triplet: String,
    /// Where `CMakeCache.txt`, `compile_commands.json` etc. live.
    pub build_dir: PathBuf,
    pub cmake_cache: CMakeCache,
}

impl BuildCache {
    /// Open the build in `build_dir`. The directory and its
    /// `CMakeCache.txt` must exist.
    pub fn load(
        board: BoardId,
        target: TargetId,
        build_type: BuildType,
        build_dir: impl AsRef<Path>,
    ) -> Result<Self> {
        let build_dir = build_dir.as_ref().to_path_buf();
        let triplet = triplet(board, target, build_type);

        if !build_dir.is_dir() {
            return Err(GaleError::MissingBuildDir {
                triplet,
                dir: build_dir,
            });
        }

        let cmake_cache_file = build_dir.join("CMakeCache.txt");
        if !cmake_cache_file.is_file() {
            return Err(GaleError::MissingCMakeCache {
                triplet,
                file: cmake_cache_file,
            });
        }

        let cmake_cache = CMakeCache::load(&cmake_cache_file)?;
        debug!(triplet = %triplet, entries = cmake_cache.values().len(), "CMakeCache parsed");

        Ok(Self {
            board,
            target,
            build_type,
            triplet,
            build_dir,
            cmake_cache,
        })
    }
}
