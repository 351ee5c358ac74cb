//! Configuration management for taskboard
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::CONFIG_GENERATED;
use crate::storage::db::MEMORY_DATABASE;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Supported backend types
pub const BACKEND_TYPES: [&str; 2] = ["supabase", "local"];

/// Accepted values for `logging.level`
pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub logging: LoggingConfig,
}

/// Backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend type: "supabase" or "local"
    pub backend_type: String,
    /// Project URL of the hosted service, e.g. https://xyzcompany.supabase.co
    pub url: String,
    /// Name of the environment variable holding the anon (public) API key
    pub anon_key_env: String,
    /// SQLite file for the local backend, or ":memory:"
    pub local_database: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging
    pub enabled: bool,
    /// Minimum level written: error, warn, info, debug or trace
    pub level: String,
    /// Log file; defaults to taskboard.log in the data directory
    pub file: Option<PathBuf>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            backend_type: "local".to_string(),
            url: String::new(),
            anon_key_env: "SUPABASE_ANON_KEY".to_string(),
            local_database: Config::get_data_dir()
                .map(|dir| dir.join("taskboard.db").display().to_string())
                .unwrap_or_else(|_| MEMORY_DATABASE.to_string()),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from("taskboard.toml");
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("taskboard").join("config.toml");
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let backend = &self.backend;
        if !BACKEND_TYPES.contains(&backend.backend_type.as_str()) {
            anyhow::bail!(
                "backend_type must be one of {}, got '{}'",
                BACKEND_TYPES.join(", "),
                backend.backend_type
            );
        }

        if backend.backend_type == "supabase" {
            if backend.url.is_empty() {
                anyhow::bail!("backend.url is required for the supabase backend");
            }
            if !backend.url.starts_with("http://") && !backend.url.starts_with("https://") {
                anyhow::bail!("backend.url must start with http:// or https://, got '{}'", backend.url);
            }
            if backend.anon_key_env.is_empty() {
                anyhow::bail!("backend.anon_key_env cannot be empty");
            }
        }

        if backend.backend_type == "local" && backend.local_database.is_empty() {
            anyhow::bail!("backend.local_database cannot be empty for the local backend");
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            anyhow::bail!(
                "logging.level must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.logging.level
            );
        }

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# Taskboard Configuration File\n# Generated on {}\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join("taskboard"))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }

    /// Where the signed-in session token is kept between runs
    pub fn get_session_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("session.json"))
    }

    /// Directory for the local database and log file
    pub fn get_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
            .map(|dir| dir.join("taskboard"))
    }
}
