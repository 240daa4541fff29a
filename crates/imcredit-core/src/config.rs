//! Configuration for imcredit
//!
//! Loaded from a TOML file with the following structure (every key is
//! optional):
//!
//! ```toml
//! [server]
//! addr = "127.0.0.1:8787"
//! db_path = "/var/lib/imcredit/imcredit.db"
//!
//! [sync]
//! poll_interval_ms = 5000
//! ```
//!
//! `IMCREDIT_ADDR` and `IMCREDIT_DB` override the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "IMCREDIT_CONFIG";
pub const ADDR_ENV: &str = "IMCREDIT_ADDR";
pub const DB_PATH_ENV: &str = "IMCREDIT_DB";

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {message}")]
    Io { path: String, message: String },

    #[error("TOML parse error: {0}")]
    Parse(String),

    #[error("Invalid value for {field}: {message}")]
    Invalid { field: String, message: String },
}

/// System-wide configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditConfig {
    pub server: ServerConfig,
    pub sync: SyncConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind
    pub addr: String,
    /// SQLite database file
    pub db_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8787".to_string(),
            db_path: default_db_path(),
        }
    }
}

/// Polling sync client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Interval between author list refreshes in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 5000,
        }
    }
}

impl SyncConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// `<data dir>/imcredit/imcredit.db`, or the working directory when the
/// platform has no data directory
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("imcredit"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("imcredit.db")
}

impl CreditConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: CreditConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Load from `IMCREDIT_CONFIG` (if set), then apply env overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_overrides(
            std::env::var(ADDR_ENV).ok(),
            std::env::var_os(DB_PATH_ENV).map(PathBuf::from),
        );
        Ok(config)
    }

    pub fn apply_overrides(&mut self, addr: Option<String>, db_path: Option<PathBuf>) {
        if let Some(addr) = addr.filter(|a| !a.trim().is_empty()) {
            self.server.addr = addr;
        }
        if let Some(db_path) = db_path {
            self.server.db_path = db_path;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.sync.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "sync.poll_interval_ms".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
