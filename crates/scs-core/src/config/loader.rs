//! Configuration loader with precedence
//!
//! Loads client configuration from the following sources (low to high):
//! 1. Built-in defaults
//! 2. Config file (`~/.scs/config.yaml` unless another path is given)
//! 3. Environment variables (`SCS_*` prefix)
//! 4. Programmatic overrides (handled by the caller)

use camino::{Utf8Path, Utf8PathBuf};
use std::env;
use std::fs;

use crate::error::{Error, Result};
use crate::retry::BackoffStrategy;

use super::types::ClientConfig;

pub const ENV_MAX_ATTEMPTS: &str = "SCS_MAX_ATTEMPTS";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "SCS_REQUEST_TIMEOUT_MS";
pub const ENV_READ_CONCERN: &str = "SCS_READ_CONCERN";
pub const ENV_BACKOFF_STRATEGY: &str = "SCS_BACKOFF_STRATEGY";

/// Client configuration loader
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Config file to read, if any
    path: Option<Utf8PathBuf>,
    /// Fail when the config file is missing
    required: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Loader reading the standard config file if it exists
    pub fn new() -> Self {
        Self {
            path: Self::default_path(),
            required: false,
        }
    }

    /// Loader reading `path`, which must exist
    pub fn with_file(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            required: true,
        }
    }

    /// Loader that only applies defaults and environment overrides
    pub fn without_file() -> Self {
        Self {
            path: None,
            required: false,
        }
    }

    /// Standard config file location (`~/.scs/config.yaml`)
    fn default_path() -> Option<Utf8PathBuf> {
        env::var("HOME")
            .or_else(|_| env::var("USERPROFILE"))
            .ok()
            .map(|home| Utf8PathBuf::from(home).join(".scs").join("config.yaml"))
    }

    /// Config file path used by this loader
    pub fn path(&self) -> Option<&Utf8Path> {
        self.path.as_deref()
    }

    /// Load configuration with precedence applied
    pub fn load(&self) -> Result<ClientConfig> {
        let mut config = match &self.path {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path, "loading client config");
                self.load_yaml_file(path)?
            }
            Some(path) if self.required => return Err(Error::config_not_found(path.as_str())),
            _ => ClientConfig::default(),
        };

        config = apply_env_overrides(config)?;
        config.validate()?;
        Ok(config)
    }

    fn load_yaml_file(&self, path: &Utf8Path) -> Result<ClientConfig> {
        let content = fs::read_to_string(path)?;
        serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))
    }
}

/// Apply `SCS_*` environment variable overrides
fn apply_env_overrides(mut config: ClientConfig) -> Result<ClientConfig> {
    if let Ok(val) = env::var(ENV_MAX_ATTEMPTS) {
        config.retry.max_attempts = val.trim().parse().map_err(|_| {
            Error::invalid_config(format!("{} must be a valid number", ENV_MAX_ATTEMPTS))
        })?;
    }

    if let Ok(val) = env::var(ENV_REQUEST_TIMEOUT_MS) {
        config.transport.request_timeout_ms = val.trim().parse().map_err(|_| {
            Error::invalid_config(format!("{} must be a valid number", ENV_REQUEST_TIMEOUT_MS))
        })?;
    }

    if let Ok(val) = env::var(ENV_READ_CONCERN) {
        config.read_concern = val.parse()?;
    }

    if let Ok(val) = env::var(ENV_BACKOFF_STRATEGY) {
        config.retry.backoff.strategy = match val.trim().to_ascii_lowercase().as_str() {
            "none" => BackoffStrategy::None,
            "fixed" => BackoffStrategy::Fixed,
            "linear" => BackoffStrategy::Linear,
            "exponential" => BackoffStrategy::Exponential,
            _ => {
                return Err(Error::invalid_config(format!(
                    "{} must be one of none, fixed, linear, exponential",
                    ENV_BACKOFF_STRATEGY
                )))
            }
        };
    }

    Ok(config)
}
