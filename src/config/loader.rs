// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::{GaleConfig, RawGaleConfig};
use crate::errors::Result;

/// Load a configuration file and return the raw `RawGaleConfig`.
///
/// Only TOML deserialization happens here; use [`load_and_validate`] for
/// the checked config.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawGaleConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawGaleConfig = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<GaleConfig> {
    let raw_config = load_from_path(&path)?;
    let config = GaleConfig::try_from(raw_config)?;
    Ok(config)
}

/// Like [`load_and_validate`], but a missing file yields the defaults.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<GaleConfig> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok(GaleConfig::default());
    }
    debug!(path = %path.display(), "loading config");
    load_and_validate(path)
}
