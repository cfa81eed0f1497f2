// src/fs/mod.rs

//! Small filesystem helpers used when staging simulation runs and caching
//! build arguments.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

/// Recursively copy `src` into `dst`, overwriting files that already
/// exist. Directories are created as needed. Returns the number of files
/// copied.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<usize> {
    fs::create_dir_all(dst).with_context(|| format!("creating dir {:?}", dst))?;

    let mut copied = 0;
    for entry in fs::read_dir(src).with_context(|| format!("reading dir {:?}", src))? {
        let entry = entry?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        let file_type = entry
            .file_type()
            .with_context(|| format!("inspecting {:?}", from))?;

        if file_type.is_dir() {
            copied += copy_tree(&from, &to)?;
        } else {
            fs::copy(&from, &to).with_context(|| format!("copying {:?} to {:?}", from, to))?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Copy `file` into directory `dir`, keeping its file name. Returns the
/// destination path.
pub fn copy_file_into(file: &Path, dir: &Path) -> Result<PathBuf> {
    let name = file
        .file_name()
        .ok_or_else(|| anyhow!("{:?} has no file name", file))?;
    let dst = dir.join(name);
    copy_file(file, &dst)?;
    Ok(dst)
}

/// Copy `src` to `dst`, creating `dst`'s parent directory.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating dir {:?}", parent))?;
    }
    fs::copy(src, dst).with_context(|| format!("copying {:?} to {:?}", src, dst))?;
    Ok(())
}

pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading file {:?}", path))
}

/// Write `contents` to `path`, creating parent directories.
pub fn write(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating dir {:?}", parent))?;
    }
    fs::write(path, contents).with_context(|| format!("writing to file {:?}", path))
}
