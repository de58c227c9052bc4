//! Configuration for dagwalk (stored in ~/.config/dagwalk/config.toml)
//!
//! ```toml
//! [walk]
//! order = "bfs"
//! skip_duplicates = true
//! on_error = "skip"
//! ```
//!
//! Every field is optional. Command-line flags take precedence.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DagwalkError, Result};
use crate::traverse::{OnError, Order};

const CONFIG_DIR: &str = "dagwalk";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_DIR_ENV_VAR: &str = "DAGWALK_CONFIG_DIR";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub walk: WalkConfig,
}

/// Defaults for `dagwalk walk`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkConfig {
    #[serde(default)]
    pub order: Order,
    #[serde(default)]
    pub skip_duplicates: bool,
    #[serde(default)]
    pub on_error: OnError,
}

impl Config {
    fn config_dir() -> Result<PathBuf> {
        // Allow environment variable override for testing
        if let Ok(env_dir) = std::env::var(CONFIG_DIR_ENV_VAR) {
            return Ok(PathBuf::from(env_dir));
        }
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR))
            .ok_or_else(|| DagwalkError::Other("unable to determine config directory".to_string()))
    }

    /// Load the user's config file, or defaults if there is none
    pub fn discover() -> Result<Self> {
        Self::discover_in(&Self::config_dir()?)
    }

    /// Load `config.toml` from `dir`, or defaults if it does not exist
    pub fn discover_in(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            DagwalkError::Other(format!(
                "failed to read config from {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            DagwalkError::invalid_value("config", format!("{}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), ?config, "config_loaded");
        Ok(config)
    }
}
