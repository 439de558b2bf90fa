//! # Configuration Management Module
//!
//! Centralized, TOML-backed configuration for bstguess. Every key has a
//! default, so `play` works without a config file at all and a file only needs
//! the keys it changes.
//!
//! ## Configuration Structure
//!
//! - [`GameConfig`] - Round pacing and the creature id range
//! - [`ApiConfig`] - PokéAPI endpoint and request timeout
//! - [`StorageConfig`] - Where the best streak is persisted
//! - [`LoggingConfig`] - Log level and optional log file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bstguess::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Write a starter file, then read it back
//!     Config::create_default("config.toml").await?;
//!     let config = Config::load("config.toml").await?;
//!
//!     println!("API: {}", config.api.base_url);
//!     println!("Feedback delay: {:?}", config.game.feedback_delay());
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [game]
//! feedback_delay_ms = 1500
//! max_creature_id = 1025
//!
//! [api]
//! base_url = "https://pokeapi.co/api/v2"
//! timeout_seconds = 10
//!
//! [storage]
//! data_dir = "./data"
//!
//! [logging]
//! level = "info"
//! ```

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::fs;

/// Highest national dex number served by the default endpoint.
pub const MAX_CREATURE_ID: u32 = 1025;

/// Pause between showing feedback and loading the next creature.
pub const DEFAULT_FEEDBACK_DELAY_MS: u64 = 1500;

// Sections default field by field: a key missing from the file takes the
// value from the section's `Default` impl.

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Milliseconds the feedback stays on screen before the next round loads
    pub feedback_delay_ms: u64,
    /// Upper bound (inclusive) of the random creature id; lower bound is 1
    pub max_creature_id: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            feedback_delay_ms: DEFAULT_FEEDBACK_DELAY_MS,
            max_creature_id: MAX_CREATURE_ID,
        }
    }
}

impl GameConfig {
    pub fn feedback_delay(&self) -> Duration {
        Duration::from_millis(self.feedback_delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the REST API; `/pokemon/{id}` is appended
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://pokeapi.co/api/v2".to_string(),
            timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Log file path; an empty string logs to the console instead
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            // Keep the terminal clean for the game itself
            file: Some("bstguess.log".to_string()),
        }
    }
}

impl LoggingConfig {
    /// Configured log file, if logging should go to one.
    pub fn log_file(&self) -> Option<&str> {
        self.file.as_deref().filter(|f| !f.trim().is_empty())
    }

    /// Parse `level`, falling back to `Info` for unknown names.
    pub fn level_filter(&self) -> log::LevelFilter {
        match self.level.to_ascii_lowercase().as_str() {
            "off" => log::LevelFilter::Off,
            "error" => log::LevelFilter::Error,
            "warn" | "warning" => log::LevelFilter::Warn,
            "debug" => log::LevelFilter::Debug,
            "trace" => log::LevelFilter::Trace,
            _ => log::LevelFilter::Info,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Load `path` when it exists, otherwise fall back to defaults.
    ///
    /// A file that exists but fails to parse is still an error.
    pub async fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }
}
