//! Application configuration loaded from `config.toml`.
//!
//! Every section is optional in the file; missing values fall back to defaults and the
//! `DATABASE_URL` and `BIND_ADDRESS` environment variables win over the file.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings
    pub server: ServerConfig,
    /// Storage settings
    pub database: DatabaseConfig,
    /// Leaderboard presentation settings
    pub leaderboard: LeaderboardConfig,
}

/// HTTP listener settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the API binds to, e.g. `"0.0.0.0:8080"`
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Storage settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SeaORM` connection string
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: super::database::DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

/// Leaderboard presentation settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LeaderboardConfig {
    /// Maximum entries returned by the public leaderboard endpoints
    pub max_entries: usize,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self { max_entries: 100 }
    }
}

impl AppConfig {
    /// Applies `DATABASE_URL` and `BIND_ADDRESS` overrides from the environment.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.database.url = url;
        }
        if let Ok(addr) = std::env::var("BIND_ADDRESS") {
            self.server.bind_address = addr;
        }
        self
    }
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    debug!("Loading configuration from {:?}", path.as_ref());
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads `./config.toml` if present, otherwise defaults, then applies environment overrides.
pub fn load_default_config() -> Result<AppConfig> {
    let path = Path::new("config.toml");
    let config = if path.exists() {
        load_config(path)?
    } else {
        debug!("No config.toml found, using defaults");
        AppConfig::default()
    };
    Ok(config.with_env_overrides())
}
