//! Process configuration loaded from environment variables.
//!
//! # Responsibility
//! - Resolve runtime mode, bearer secret, public base URL and logging
//!   settings once at startup.
//!
//! # Invariants
//! - Loading never panics; malformed values surface as `ConfigError`.
//! - Lookup is injectable so tests never touch the real process environment.

use crate::logging::{default_log_level, normalize_level, LogSettings};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_MODE: &str = "PINBOARD_ENV";
pub const ENV_API_TOKEN: &str = "PINBOARD_API_TOKEN";
pub const ENV_BASE_URL: &str = "PINBOARD_BASE_URL";
pub const ENV_LOG_LEVEL: &str = "PINBOARD_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "PINBOARD_LOG_DIR";

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Runtime mode. Controls error verbosity and console log duplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Production,
    #[default]
    Development,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Self::Production
    }

    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" | "test" => Ok(Self::Development),
            other => Err(ConfigError::InvalidValue {
                key: ENV_MODE,
                value: other.to_string(),
            }),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value } => {
                write!(f, "invalid value `{value}` for `{key}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Resolved process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub environment: Environment,
    /// Bearer secret required by mutating calls. `None` rejects them all.
    pub api_token: Option<String>,
    /// Public base URL used to build `Location` values, without trailing `/`.
    pub base_url: String,
    pub log_level: &'static str,
    /// Absolute directory for rolling log files; `None` disables file logs.
    pub log_dir: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            api_token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl ServiceConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = get(ENV_MODE) {
            config.environment = Environment::parse(&value)?;
        }
        config.api_token = get(ENV_API_TOKEN).map(|value| value.trim().to_string());
        if let Some(value) = get(ENV_BASE_URL) {
            config.base_url = normalize_base_url(&value)?;
        }
        if let Some(value) = get(ENV_LOG_LEVEL) {
            config.log_level = normalize_level(&value).map_err(|_| ConfigError::InvalidValue {
                key: ENV_LOG_LEVEL,
                value: value.clone(),
            })?;
        }
        if let Some(value) = get(ENV_LOG_DIR) {
            let path = PathBuf::from(value.trim());
            if !path.is_absolute() {
                return Err(ConfigError::InvalidValue {
                    key: ENV_LOG_DIR,
                    value,
                });
            }
            config.log_dir = Some(path);
        }

        Ok(config)
    }

    /// Logging settings derived from this config, if file logging is enabled.
    pub fn log_settings(&self) -> Option<LogSettings> {
        self.log_dir.as_ref().map(|dir| LogSettings {
            level: self.log_level,
            log_dir: dir.clone(),
            duplicate_to_stderr: !self.environment.is_production(),
        })
    }
}

fn normalize_base_url(value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidValue {
            key: ENV_BASE_URL,
            value: value.to_string(),
        });
    }
    Ok(trimmed.to_string())
}
