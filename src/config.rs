//! Application configuration
//!
//! Settings are read from a TOML file. Every section is optional and falls
//! back to its defaults, so an empty file is a valid configuration.
//!
//! ```toml
//! [backend]
//! mode = "http"
//! base_url = "https://api.skillforge.ai"
//! timeout_secs = 10
//!
//! [storage]
//! path = "/var/lib/skillforge/prefs"
//!
//! [contact]
//! submit_delay_ms = 2000
//! acknowledgement_ms = 5000
//!
//! [appearance]
//! prefer_dark = true
//!
//! [logging]
//! level = "debug"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Longest simulated or displayed delay accepted from configuration
const MAX_DELAY_MS: u64 = 60_000;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for this schema
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The values are inconsistent
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Which collaborator implementations to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// Fixed data and simulated latency
    #[default]
    Mock,
    /// Real services over HTTP
    Http,
}

/// `[backend]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Collaborator implementations
    pub mode: BackendMode,
    /// Service base URL (required in HTTP mode)
    pub base_url: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self { mode: BackendMode::Mock, base_url: None, timeout_secs: 30 }
    }
}

impl BackendConfig {
    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `[storage]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Durable store location; absent means preferences live in memory
    pub path: Option<PathBuf>,
    /// Store cache size in bytes
    pub cache_capacity: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { path: None, cache_capacity: 8 * 1024 * 1024 }
    }
}

/// `[contact]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Simulated delivery latency of the mock messaging service
    pub submit_delay_ms: u64,
    /// How long the success acknowledgment is shown
    pub acknowledgement_ms: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self { submit_delay_ms: 2000, acknowledgement_ms: 5000 }
    }
}

impl ContactConfig {
    /// Mock delivery latency
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    /// Acknowledgment window
    pub fn acknowledgement(&self) -> Duration {
        Duration::from_millis(self.acknowledgement_ms)
    }
}

/// `[appearance]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Overrides the OS dark-appearance signal when set
    pub prefer_dark: Option<bool>,
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Collaborator selection
    pub backend: BackendConfig,
    /// Preference storage
    pub storage: StorageConfig,
    /// Contact form timing
    pub contact: ContactConfig,
    /// Appearance override
    pub appearance: AppearanceConfig,
    /// Logging
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load and validate a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<()> {
        if self.backend.mode == BackendMode::Http {
            match self.backend.base_url.as_deref().map(str::trim) {
                Some(url) if !url.is_empty() => {}
                _ => {
                    return Err(ConfigError::Invalid(
                        "backend.base_url is required in http mode".to_string(),
                    ))
                }
            }
        }

        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::Invalid("backend.timeout_secs must be positive".to_string()));
        }

        for (name, value) in [
            ("contact.submit_delay_ms", self.contact.submit_delay_ms),
            ("contact.acknowledgement_ms", self.contact.acknowledgement_ms),
        ] {
            if value > MAX_DELAY_MS {
                return Err(ConfigError::Invalid(format!(
                    "{} must be at most {}",
                    name, MAX_DELAY_MS
                )));
            }
        }

        Ok(())
    }
}
