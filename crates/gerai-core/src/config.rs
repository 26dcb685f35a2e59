//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/gerai/config.toml)
//! 3. Environment variables (GERAI_* prefix)
//!
//! Environment variables take precedence over config file values.
//!
//! This is the installation-level configuration (where data lives, how long
//! replication may take). User-facing settings such as the sink URL live in
//! the persistent store, see [`crate::settings`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable prefix
const ENV_PREFIX: &str = "GERAI";

/// Default upper bound for a single replication attempt
pub const DEFAULT_REPLICATION_TIMEOUT_SECS: u64 = 15;

/// Bounds applied to `replication_timeout_secs`
const MIN_REPLICATION_TIMEOUT_SECS: u64 = 1;
const MAX_REPLICATION_TIMEOUT_SECS: u64 = 120;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory for the persistent store
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Log file for diagnostics (defaults to {data_dir}/debug.log)
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Upper bound in seconds for one replication attempt
    #[serde(default = "default_replication_timeout")]
    pub replication_timeout_secs: u64,

    /// Vendors offered on first run, before anything is stored
    #[serde(default = "default_vendor_seed")]
    pub vendor_seed: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_file: None,
            replication_timeout_secs: DEFAULT_REPLICATION_TIMEOUT_SECS,
            vendor_seed: default_vendor_seed(),
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (GERAI_DATA_DIR, GERAI_LOG_FILE, GERAI_REPLICATION_TIMEOUT)
    /// 2. Config file (~/.config/gerai/config.toml or GERAI_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.ensure_data_dir()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // GERAI_DATA_DIR
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        // GERAI_LOG_FILE
        if let Ok(val) = std::env::var(format!("{}_LOG_FILE", ENV_PREFIX)) {
            self.log_file = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }

        // GERAI_REPLICATION_TIMEOUT (ignored when not a number)
        if let Ok(val) = std::env::var(format!("{}_REPLICATION_TIMEOUT", ENV_PREFIX)) {
            if let Ok(secs) = val.trim().parse() {
                self.replication_timeout_secs = secs;
            }
        }
    }

    /// Ensure data directory exists
    fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)
                .with_context(|| format!("Failed to create data directory: {:?}", self.data_dir))?;
        }
        Ok(())
    }

    /// Save configuration to the default file
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_file_path())
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with GERAI_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gerai")
            .join("config.toml")
    }

    /// Directory holding one file per persistent store key
    pub fn store_dir(&self) -> PathBuf {
        self.data_dir.join("store")
    }

    /// Log file path, falling back to the data directory
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("debug.log"))
    }

    /// Vendor names to seed a first-run registry with
    ///
    /// Blank entries are ignored; a seed with no usable names falls back to
    /// the built-in list so a fresh registry is never empty.
    pub fn vendor_seed(&self) -> Vec<String> {
        let seed: Vec<String> = self
            .vendor_seed
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect();
        if seed.is_empty() {
            default_vendor_seed()
        } else {
            seed
        }
    }

    /// Replication timeout, clamped to a sane range
    pub fn replication_timeout(&self) -> Duration {
        Duration::from_secs(self.replication_timeout_secs.clamp(
            MIN_REPLICATION_TIMEOUT_SECS,
            MAX_REPLICATION_TIMEOUT_SECS,
        ))
    }
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gerai")
}

fn default_replication_timeout() -> u64 {
    DEFAULT_REPLICATION_TIMEOUT_SECS
}

fn default_vendor_seed() -> Vec<String> {
    ["Mak Kiah", "Pak Abu", "Kak Ani"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
