//! User configuration: backend location, retry policy and default season.
//!
//! Loaded from TOML. Every field has a default, so a missing file or a
//! partial file is fine. Lookup order for the file:
//!
//! 1. an explicit path (`--config`)
//! 2. `$COURTSIDE_CONFIG`
//! 3. `<config dir>/courtside/config.toml`
//!
//! `$COURTSIDE_API_URL` then overrides `api.base_url`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::Season;

pub const CONFIG_ENV: &str = "COURTSIDE_CONFIG";
pub const API_URL_ENV: &str = "COURTSIDE_API_URL";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
/// Upper bound on `api.max_retries`; backoff doubles per attempt.
pub const MAX_RETRIES: u32 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Extra attempts after the first for transient failures.
    pub max_retries: u32,
    pub retry_base_delay_ms: u64,
    pub failure_threshold: u32,
    pub cooldown_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            max_retries: 2,
            retry_base_delay_ms: 500,
            failure_threshold: 3,
            cooldown_secs: 30,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub default_season: Season,
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve and load configuration from the process environment.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(explicit, |key| std::env::var(key).ok())
    }

    /// [`Config::load`] with an injectable environment lookup.
    ///
    /// An explicit path or `$COURTSIDE_CONFIG` must exist; the default
    /// location is optional.
    pub fn load_with(
        explicit: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let required = explicit
            .map(Path::to_path_buf)
            .or_else(|| env(CONFIG_ENV).filter(|s| !s.is_empty()).map(PathBuf::from));

        let mut config = match required {
            Some(path) => {
                debug!(path = %path.display(), "loading config");
                Self::from_file(&path)?
            }
            None => match default_path().filter(|p| p.is_file()) {
                Some(path) => {
                    debug!(path = %path.display(), "loading config");
                    Self::from_file(&path)?
                }
                None => {
                    debug!("no config file, using defaults");
                    Self::default()
                }
            },
        };

        if let Some(url) = env(API_URL_ENV).filter(|s| !s.is_empty()) {
            config.api.base_url = url;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "api.base_url must start with http:// or https://, got '{url}'"
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid("api.timeout_secs must be positive".into()));
        }
        if self.api.max_retries > MAX_RETRIES {
            return Err(ConfigError::Invalid(format!(
                "api.max_retries must be at most {MAX_RETRIES}, got {}",
                self.api.max_retries
            )));
        }
        Ok(())
    }
}

/// `<config dir>/courtside/config.toml`, when the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("courtside").join("config.toml"))
}

/// Directory for TUI logs and other per-user files.
pub fn data_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("courtside")
}
