// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GaleError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid working directory {}", .0.display())]
    InvalidWorkingDirectory(PathBuf),

    #[error("Cmd `{cmd}` failed (code {code}): {output}")]
    CommandFailed {
        cmd: String,
        code: i32,
        output: String,
    },

    #[error("Failed to start `{cmd}`: {source}")]
    SpawnFailed {
        cmd: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Build directory for the target '{triplet}' does not exist ({}); run 'gale build' on the target first", .dir.display())]
    MissingBuildDir { triplet: String, dir: PathBuf },

    #[error("CMakeCache for the target '{triplet}' does not exist ({})", .file.display())]
    MissingCMakeCache { triplet: String, file: PathBuf },

    #[error("CMakeCache {} does not define {key}", .path.display())]
    MissingCacheKey { path: PathBuf, key: String },

    #[error("Output binary '{}' does not exist; use build first", .0.display())]
    MissingBinary(PathBuf),

    #[error("Board '{0}' is not a BabbleSim board")]
    NotBsimBoard(String),

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Shutting down; not starting `{0}`")]
    ShuttingDown(String),

    #[error("Malformed command line `{cmd}`: {reason}")]
    InvalidCommand { cmd: String, reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, GaleError>;
