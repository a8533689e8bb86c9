//! CLI commands.

pub mod crud;
pub mod guard;
mod report;

use anyhow::{Context, Result};
use apicheck_core::Config;
use std::path::PathBuf;

/// Flags shared by every command; applied over file and environment config.
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub base_url: Option<String>,
    pub timeout: Option<u64>,
}

/// Loads defaults, then the config file, then `APICHECK_*` variables, then flags.
pub fn load_config(overrides: &Overrides) -> Result<Config> {
    let mut config =
        Config::load(overrides.config.as_deref()).context("Failed to load configuration")?;
    config
        .apply_env()
        .context("Invalid APICHECK_* environment variable")?;

    if let Some(url) = &overrides.base_url {
        config.server.base_url = url.clone();
    }
    if let Some(timeout) = overrides.timeout {
        config.server.timeout_secs = timeout;
    }
    Ok(config)
}
