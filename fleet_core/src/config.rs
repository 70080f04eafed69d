//! Configuration file support.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/mgps/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub indicators: IndicatorsConfig,
}

/// Report numbering configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

/// Extra indicator labels appended to the base catalog at session start
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct IndicatorsConfig {
    #[serde(default)]
    pub extra: Vec<String>,
}

fn default_prefix() -> String {
    crate::report::DEFAULT_PREFIX.to_string()
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("mgps").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Reject configurations no session could run with
    pub fn validate(&self) -> Result<()> {
        if self.report.prefix.trim().is_empty() {
            return Err(Error::Config("report prefix must not be empty".into()));
        }
        Ok(())
    }
}
