//! Bqshift Configuration Module
//!
//! Persistent defaults for transfer-plan construction.
//! Config is stored in `~/.config/bqshift/config.toml`.
//!
//! ## Priority Order (highest to lowest)
//!
//! 1. CLI flags
//! 2. Environment variables (`BQSHIFT_TABLE_LIST`, `BQSHIFT_SOURCE_BUCKET`,
//!    `BQSHIFT_DEST_BUCKET`)
//! 3. Config file (`~/.config/bqshift/config.toml`)

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShiftError};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ShiftConfig {
    /// Transfer inputs: table list and staging buckets
    #[serde(default)]
    pub transfer: TransferSettings,

    /// Output defaults
    #[serde(default)]
    pub output: OutputSettings,
}

/// Transfer input settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TransferSettings {
    /// Path to the table-list file
    pub table_list: Option<String>,

    /// Staging bucket in the source region
    pub source_bucket: Option<String>,

    /// Staging bucket in the destination region
    pub dest_bucket: Option<String>,
}

/// Output settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutputSettings {
    /// Default manifest format (yaml, json)
    pub format: Option<String>,
}

impl ShiftConfig {
    /// Get the config directory path
    ///
    /// Returns `~/.config/bqshift/` on Unix, `%APPDATA%/bqshift/` on Windows
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bqshift")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file
    ///
    /// Returns default config if file doesn't exist.
    /// Returns error if file exists but is malformed.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| ShiftError::ConfigError {
            reason: format!("Failed to read config file: {}", e),
        })?;

        toml::from_str(&content).map_err(|e| ShiftError::ConfigError {
            reason: format!("Failed to parse config file: {}", e),
        })
    }

    /// Save configuration to file, creating the directory if needed.
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir();
        let path = Self::config_path();

        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| ShiftError::ConfigError {
                reason: format!("Failed to create config directory: {}", e),
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| ShiftError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(&path, content).map_err(|e| ShiftError::ConfigError {
            reason: format!("Failed to write config file: {}", e),
        })?;

        Ok(())
    }

    /// Merge with environment variables.
    ///
    /// Environment variables take precedence over config file values.
    pub fn with_env(mut self) -> Self {
        if let Ok(v) = std::env::var("BQSHIFT_TABLE_LIST") {
            if !v.is_empty() {
                self.transfer.table_list = Some(v);
            }
        }

        if let Ok(v) = std::env::var("BQSHIFT_SOURCE_BUCKET") {
            if !v.is_empty() {
                self.transfer.source_bucket = Some(v);
            }
        }

        if let Ok(v) = std::env::var("BQSHIFT_DEST_BUCKET") {
            if !v.is_empty() {
                self.transfer.dest_bucket = Some(v);
            }
        }

        self
    }

    /// Default manifest format, falling back to YAML
    pub fn format(&self) -> &str {
        self.output.format.as_deref().unwrap_or("yaml")
    }
}

/// Resolve a required setting: CLI flag first, then env-merged config.
pub fn require(
    flag_value: Option<String>,
    config_value: Option<&str>,
    setting: &str,
    flag: &str,
    env: &str,
) -> Result<String> {
    flag_value
        .or_else(|| config_value.map(str::to_string))
        .ok_or_else(|| ShiftError::MissingSetting {
            setting: setting.to_string(),
            flag: flag.to_string(),
            env: env.to_string(),
        })
}
