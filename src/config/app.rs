//! Main application configuration
//!
//! This module defines the primary configuration structures for the swiss-room
//! service, including environment variable and TOML file loading and validation.

use crate::config::standings::StandingsConfig;
use crate::store::DEFAULT_MAX_PLAYERS;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub standings: StandingsConfig,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Match store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// JSON file the in-memory store is loaded from and saved to
    pub data_file: PathBuf,
    /// Maximum number of players enrolled in one tournament
    pub max_players_per_tournament: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "swiss-room".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("swiss-room.json"),
            max_players_per_tournament: DEFAULT_MAX_PLAYERS,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; environment variables still override it
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        self.apply_vars(|key| env::var(key).ok())
    }

    /// Overlay `SWISS_*` settings read through `var`
    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(name) = var("SWISS_SERVICE_NAME") {
            self.service.name = name;
        }
        if let Some(log_level) = var("SWISS_LOG_LEVEL") {
            self.service.log_level = log_level;
        }
        if let Some(data_file) = var("SWISS_DATA_FILE") {
            self.store.data_file = PathBuf::from(data_file);
        }
        if let Some(max_players) = var("SWISS_MAX_PLAYERS") {
            self.store.max_players_per_tournament = max_players
                .parse()
                .map_err(|_| anyhow!("Invalid SWISS_MAX_PLAYERS value: {}", max_players))?;
        }
        if let Some(tie_break) = var("SWISS_FINAL_TIE_BREAK") {
            self.standings.final_tie_break = tie_break
                .parse()
                .map_err(|e| anyhow!("Invalid SWISS_FINAL_TIE_BREAK value: {}", e))?;
        }
        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    // Validate store settings
    if config.store.data_file.as_os_str().is_empty() {
        return Err(anyhow!("Data file path cannot be empty"));
    }
    if config.store.max_players_per_tournament == 0 {
        return Err(anyhow!("Max players per tournament must be greater than 0"));
    }

    Ok(())
}
