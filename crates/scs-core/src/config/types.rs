//! Client configuration types
//!
//! These types control transport deadlines, retry behavior and read
//! consistency for a client.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::interceptor::ReadConcern;
use crate::retry::{Backoff, EligibilityPolicy, FixedCountRetryStrategy, DEFAULT_MAX_ATTEMPTS};

/// Complete client configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClientConfig {
    /// Transport settings
    #[serde(default)]
    pub transport: TransportConfig,

    /// Retry settings
    #[serde(default)]
    pub retry: RetryConfig,

    /// Read consistency sent with every request
    #[serde(default)]
    pub read_concern: ReadConcern,
}

impl ClientConfig {
    /// Parse a configuration from YAML; missing fields take their defaults
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: ClientConfig = serde_yaml_ng::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.retry.max_attempts == 0 {
            return Err(Error::invalid_config("retry.max-attempts must be at least 1"));
        }
        if self.transport.request_timeout_ms == 0 {
            return Err(Error::invalid_config(
                "transport.request-timeout-ms must be greater than 0",
            ));
        }
        if self.retry.backoff.max_delay_ms < self.retry.backoff.initial_delay_ms {
            return Err(Error::invalid_config(
                "retry.backoff.max-delay-ms must not be less than initial-delay-ms",
            ));
        }
        let multiplier = self.retry.backoff.multiplier;
        if !multiplier.is_finite() || multiplier < 1.0 {
            return Err(Error::invalid_config(format!(
                "retry.backoff.multiplier must be a finite number of at least 1.0, got {}",
                multiplier
            )));
        }
        Ok(())
    }

    pub fn with_read_concern(mut self, read_concern: ReadConcern) -> Self {
        self.read_concern = read_concern;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.retry.max_attempts = max_attempts;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.transport.request_timeout_ms = timeout.as_millis() as u64;
        self
    }
}

/// Transport configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TransportConfig {
    /// Per-attempt deadline in milliseconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: default_request_timeout(),
        }
    }
}

impl TransportConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn default_request_timeout() -> u64 {
    5000
}

/// Retry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RetryConfig {
    /// Attempts per logical call, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay between attempts
    #[serde(default)]
    pub backoff: Backoff,

    /// Methods to retry in addition to the idempotent defaults
    #[serde(default)]
    pub additional_retryable_methods: Vec<String>,

    /// Default methods that should not be retried
    #[serde(default)]
    pub excluded_methods: Vec<String>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff: Backoff::default(),
            additional_retryable_methods: Vec::new(),
            excluded_methods: Vec::new(),
        }
    }
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

impl RetryConfig {
    /// Eligibility policy described by this configuration
    pub fn eligibility_policy(&self) -> EligibilityPolicy {
        let mut policy = EligibilityPolicy::default();
        for method in &self.additional_retryable_methods {
            policy = policy.with_method(method.as_str());
        }
        for method in &self.excluded_methods {
            policy = policy.without_method(method);
        }
        policy
    }

    /// Retry strategy described by this configuration
    pub fn strategy(&self) -> FixedCountRetryStrategy {
        FixedCountRetryStrategy::default()
            .with_max_attempts(self.max_attempts)
            .with_eligibility_policy(self.eligibility_policy())
            .with_backoff(self.backoff.clone())
    }
}
