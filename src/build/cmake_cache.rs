// src/build/cmake_cache.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::errors::{GaleError, Result};

/// `KEY:TYPE=VALUE`; TYPE may be empty.
const LINE_PATTERN: &str = r"^([^\s:]+):\w*=(.*)$";

/// Values parsed from a `CMakeCache.txt`.
///
/// Keys with an empty value are kept but treated as undefined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CMakeCache {
    path: PathBuf,
    values: BTreeMap<String, Option<String>>,
}

impl CMakeCache {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = crate::fs::read_to_string(path)?;
        Self::parse(path, &contents)
    }

    /// Parse cache contents; `path` is only used for error messages.
    pub fn parse(path: impl Into<PathBuf>, contents: &str) -> Result<Self> {
        let pattern = Regex::new(LINE_PATTERN)
            .map_err(|e| GaleError::Other(anyhow::anyhow!("invalid CMakeCache pattern: {e}")))?;

        let mut values = BTreeMap::new();
        for line in contents.lines() {
            let Some(caps) = pattern.captures(line.trim()) else {
                continue;
            };
            let value = &caps[2];
            values.insert(
                caps[1].to_string(),
                (!value.is_empty()).then(|| value.to_string()),
            );
        }

        Ok(Self {
            path: path.into(),
            values,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn values(&self) -> &BTreeMap<String, Option<String>> {
        &self.values
    }

    /// Value of `key`; missing or empty keys are an error.
    pub fn get(&self, key: &str) -> Result<&str> {
        match self.values.get(key) {
            Some(Some(value)) => Ok(value),
            _ => Err(GaleError::MissingCacheKey {
                path: self.path.clone(),
                key: key.to_string(),
            }),
        }
    }

    pub fn gdb(&self) -> Result<&str> {
        self.get("CMAKE_GDB")
    }

    pub fn zephyr_base(&self) -> Result<PathBuf> {
        self.get("ZEPHYR_BASE").map(PathBuf::from)
    }

    pub fn exe_path(&self) -> Result<PathBuf> {
        self.get("BYPRODUCT_KERNEL_EXE_NAME").map(PathBuf::from)
    }

    pub fn elf_path(&self) -> Result<PathBuf> {
        self.get("BYPRODUCT_KERNEL_ELF_NAME").map(PathBuf::from)
    }

    pub fn bin_path(&self) -> Result<PathBuf> {
        self.get("BYPRODUCT_KERNEL_BIN_NAME").map(PathBuf::from)
    }

    pub fn bsim_out_path(&self) -> Result<PathBuf> {
        self.get("BSIM_OUT_PATH").map(PathBuf::from)
    }

    pub fn codechecker_exe(&self) -> Result<&str> {
        self.get("CODECHECKER_EXE")
    }
}
