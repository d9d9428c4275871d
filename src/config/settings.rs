//! Configuration settings for lapwatch.
//!
//! Settings are loaded from `~/.lapwatch/config.yaml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::LapwatchError;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Stopwatch engine settings.
    pub stopwatch: StopwatchConfig,
    /// Session history storage settings.
    pub storage: StorageConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format for CLI commands.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
}

/// Stopwatch engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StopwatchConfig {
    /// Tick interval in milliseconds; each tick adds this much elapsed time.
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
}

/// Session history storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Blob store key holding the serialized session list.
    #[serde(default = "default_storage_key")]
    pub key: String,
    /// Database file override. Defaults to `~/.lapwatch/lapwatch.db`.
    #[serde(default)]
    pub database: Option<PathBuf>,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_tick_interval() -> u64 {
    10
}

fn default_storage_key() -> String {
    "stopwatch-sessions".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
        }
    }
}

impl Default for StopwatchConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: default_storage_key(),
            database: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed, or if
    /// it holds values the stopwatch cannot run with.
    pub fn load_from_path(path: &Path) -> Result<Self, LapwatchError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            LapwatchError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            LapwatchError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &Path) -> Result<(), LapwatchError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| LapwatchError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            LapwatchError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Render the effective configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, LapwatchError> {
        serde_yaml::to_string(self)
            .map_err(|e| LapwatchError::Config(format!("Failed to serialize config: {e}")))
    }

    /// Resolve the database file, honoring the storage override.
    #[must_use]
    pub fn database_path(&self, paths: &Paths) -> PathBuf {
        self.storage
            .database
            .clone()
            .unwrap_or_else(|| paths.database.clone())
    }

    fn validate(&self) -> Result<(), LapwatchError> {
        if self.stopwatch.tick_interval_ms == 0 {
            return Err(LapwatchError::Config(
                "stopwatch.tick_interval_ms must be at least 1".to_string(),
            ));
        }
        if self.storage.key.trim().is_empty() {
            return Err(LapwatchError::Config(
                "storage.key must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
