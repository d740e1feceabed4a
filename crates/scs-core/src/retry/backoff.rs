//! Delay between retry attempts
//!
//! Retries are immediate by default. A non-zero backoff is an opt-in
//! extension configured through [`Backoff`].

use rand::RngExt;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How the delay grows between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BackoffStrategy {
    /// Retry immediately (default)
    #[default]
    None,

    /// Same delay before every retry
    Fixed,

    /// Delay grows by `initial_delay_ms` per attempt
    Linear,

    /// Delay multiplies by `multiplier` per attempt
    Exponential,
}

/// Backoff configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Backoff {
    #[serde(default)]
    pub strategy: BackoffStrategy,

    /// Delay before the first retry in milliseconds
    #[serde(default = "default_initial_delay")]
    pub initial_delay_ms: u64,

    /// Upper bound for any single delay in milliseconds
    #[serde(default = "default_max_delay")]
    pub max_delay_ms: u64,

    /// Growth factor for exponential backoff
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,

    /// Add up to 25% random variation to non-zero delays
    #[serde(default)]
    pub jitter: bool,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            strategy: BackoffStrategy::default(),
            initial_delay_ms: default_initial_delay(),
            max_delay_ms: default_max_delay(),
            multiplier: default_multiplier(),
            jitter: false,
        }
    }
}

fn default_initial_delay() -> u64 {
    100
}
fn default_max_delay() -> u64 {
    5000
}
fn default_multiplier() -> f64 {
    2.0
}

impl Backoff {
    /// No delay between attempts
    pub fn none() -> Self {
        Self::default()
    }

    pub fn fixed(delay: Duration) -> Self {
        Self {
            strategy: BackoffStrategy::Fixed,
            initial_delay_ms: delay.as_millis() as u64,
            max_delay_ms: delay.as_millis() as u64,
            ..Self::default()
        }
    }

    pub fn exponential(initial: Duration, max: Duration, multiplier: f64) -> Self {
        Self {
            strategy: BackoffStrategy::Exponential,
            initial_delay_ms: initial.as_millis() as u64,
            max_delay_ms: max.as_millis() as u64,
            multiplier,
            jitter: false,
        }
    }

    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Delay to wait after failed attempt number `attempt` (1-indexed)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        calculate_delay(self, attempt)
    }
}

/// Calculate the delay before the retry that follows `attempt`
///
/// # Example
///
/// ```rust
/// use scs_core::retry::{calculate_delay, Backoff};
/// use std::time::Duration;
///
/// let backoff = Backoff::exponential(
///     Duration::from_millis(100),
///     Duration::from_secs(5),
///     2.0,
/// );
///
/// assert_eq!(calculate_delay(&backoff, 1).as_millis(), 100);
/// assert_eq!(calculate_delay(&backoff, 2).as_millis(), 200);
/// ```
pub fn calculate_delay(backoff: &Backoff, attempt: u32) -> Duration {
    let step = u64::from(attempt.max(1));

    let delay_ms = match backoff.strategy {
        BackoffStrategy::None => return Duration::ZERO,
        BackoffStrategy::Fixed => backoff.initial_delay_ms,
        BackoffStrategy::Linear => backoff.initial_delay_ms.saturating_mul(step),
        // float-to-int `as` saturates, so huge products clamp to u64::MAX
        BackoffStrategy::Exponential => {
            (backoff.initial_delay_ms as f64 * backoff.multiplier.powf((step - 1) as f64)) as u64
        }
    }
    .min(backoff.max_delay_ms);

    if !backoff.jitter || delay_ms == 0 {
        return Duration::from_millis(delay_ms);
    }

    let extra_ms = rand::rng().random_range(0..=delay_ms / 4);
    Duration::from_millis(delay_ms.saturating_add(extra_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_always_zero() {
        let backoff = Backoff::none().with_jitter(true);
        for attempt in 1..=5 {
            assert_eq!(calculate_delay(&backoff, attempt), Duration::ZERO);
        }
    }

    #[test]
    fn test_fixed() {
        let backoff = Backoff::fixed(Duration::from_millis(250));
        for attempt in 1..=3 {
            assert_eq!(
                calculate_delay(&backoff, attempt),
                Duration::from_millis(250)
            );
        }
    }

    #[test]
    fn test_linear() {
        let backoff = Backoff {
            strategy: BackoffStrategy::Linear,
            initial_delay_ms: 100,
            max_delay_ms: 10_000,
            ..Backoff::default()
        };
        assert_eq!(calculate_delay(&backoff, 1), Duration::from_millis(100));
        assert_eq!(calculate_delay(&backoff, 2), Duration::from_millis(200));
        assert_eq!(calculate_delay(&backoff, 3), Duration::from_millis(300));
    }

    #[test]
    fn test_exponential_is_capped() {
        let backoff = Backoff::exponential(
            Duration::from_millis(100),
            Duration::from_millis(500),
            2.0,
        );
        assert_eq!(calculate_delay(&backoff, 1), Duration::from_millis(100));
        assert_eq!(calculate_delay(&backoff, 3), Duration::from_millis(400));
        // 100 * 2^4 = 1600, capped
        assert_eq!(calculate_delay(&backoff, 5), Duration::from_millis(500));
    }

    #[test]
    fn test_jitter_bounds() {
        let backoff = Backoff::fixed(Duration::from_millis(1000)).with_jitter(true);
        for _ in 0..100 {
            let delay = calculate_delay(&backoff, 1);
            assert!(delay >= Duration::from_millis(1000));
            assert!(delay <= Duration::from_millis(1250));
        }
    }

    #[test]
    fn test_jitter_near_u64_max_saturates() {
        let backoff = Backoff {
            strategy: BackoffStrategy::Exponential,
            initial_delay_ms: 100,
            max_delay_ms: u64::MAX,
            multiplier: 2.0,
            jitter: true,
        };
        for _ in 0..20 {
            assert_eq!(
                calculate_delay(&backoff, 200),
                Duration::from_millis(u64::MAX)
            );
        }
    }

    #[test]
    fn test_linear_saturates() {
        let backoff = Backoff {
            strategy: BackoffStrategy::Linear,
            initial_delay_ms: u64::MAX / 2,
            max_delay_ms: u64::MAX,
            ..Backoff::default()
        };
        assert_eq!(calculate_delay(&backoff, 3), Duration::from_millis(u64::MAX));
    }

    #[test]
    fn test_deserialize_kebab_case() {
        let yaml = "strategy: exponential\ninitial-delay-ms: 50\nmax-delay-ms: 800\n";
        let backoff: Backoff = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(backoff.strategy, BackoffStrategy::Exponential);
        assert_eq!(backoff.initial_delay_ms, 50);
        assert_eq!(backoff.max_delay_ms, 800);
        assert_eq!(backoff.multiplier, 2.0);
        assert!(!backoff.jitter);
    }
}
