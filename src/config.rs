//! User configuration stored as JSON in the platform config directory

use crate::search::SearchSession;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Display settings for the search tools
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Match tags shown before collapsing the rest into "+N autres"
    pub match_tag_limit: usize,
    /// Default cap on listed results; `None` lists all of them
    pub result_limit: Option<usize>,
    /// Delay before a closing detail view disappears
    pub detail_close_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            match_tag_limit: 3,
            result_limit: None,
            detail_close_delay_ms: 300,
        }
    }
}

impl Config {
    pub fn detail_close_delay(&self) -> Duration {
        Duration::from_millis(self.detail_close_delay_ms)
    }

    /// Fresh search panel using these settings
    pub fn new_session(&self) -> SearchSession {
        SearchSession::new().with_close_delay(self.detail_close_delay())
    }
}

/// Get the path to the configuration file
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Cannot determine config directory")?;

    Ok(config_dir.join("estate-search").join("config.json"))
}

/// Load the configuration, falling back to defaults when no file exists
pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Load the configuration from an explicit path
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("No config at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let data = fs::read_to_string(path).context("Failed to read config file")?;

    let config: Config = serde_json::from_str(&data).context("Failed to parse config file")?;

    Ok(config)
}

/// Save the configuration to an explicit path, creating parent directories
pub fn save_config_to(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let data = serde_json::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(path, data).context("Failed to write config file")?;

    Ok(())
}
