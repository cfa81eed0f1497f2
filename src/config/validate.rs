// src/config/validate.rs

use crate::config::model::{GaleConfig, RawGaleConfig};
use crate::errors::{GaleError, Result};

impl TryFrom<RawGaleConfig> for GaleConfig {
    type Error = GaleError;

    fn try_from(raw: RawGaleConfig) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(GaleConfig::new_unchecked(raw))
    }
}

fn validate_raw_config(cfg: &RawGaleConfig) -> Result<()> {
    validate_bsim(cfg)?;
    validate_sca(cfg)?;
    validate_monitor(cfg)?;
    validate_terminal(cfg)?;
    Ok(())
}

fn validate_bsim(cfg: &RawGaleConfig) -> Result<()> {
    if cfg.bsim.handbrake_interval_ns == 0 {
        return Err(GaleError::ConfigError(
            "[bsim].handbrake_interval_ns must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_sca(cfg: &RawGaleConfig) -> Result<()> {
    if cfg.sca.port == 0 {
        return Err(GaleError::ConfigError(
            "[sca].port must be >= 1 (got 0)".to_string(),
        ));
    }
    if cfg.sca.startup_timeout_secs == 0 {
        return Err(GaleError::ConfigError(
            "[sca].startup_timeout_secs must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_monitor(cfg: &RawGaleConfig) -> Result<()> {
    if cfg.monitor.baud == 0 {
        return Err(GaleError::ConfigError(
            "[monitor].baud must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_terminal(cfg: &RawGaleConfig) -> Result<()> {
    if let Some(launcher) = &cfg.terminal.launcher {
        if launcher.is_empty() || launcher[0].trim().is_empty() {
            return Err(GaleError::ConfigError(
                "[terminal].launcher must name a program".to_string(),
            ));
        }
    }
    Ok(())
}
