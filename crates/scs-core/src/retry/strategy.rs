//! Retry strategies
//!
//! A [`RetryStrategy`] combines retry eligibility with an attempt budget and a
//! delay. Strategies are immutable; the `with_*` methods return new
//! instances and leave the receiver untouched.

use std::sync::Arc;
use std::time::Duration;

use crate::status::StatusCode;

use super::backoff::{calculate_delay, Backoff};
use super::eligibility::EligibilityPolicy;

/// Default number of attempts for a logical call, including the first
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Decides whether and when a failed attempt is retried
pub trait RetryStrategy: Send + Sync + std::fmt::Debug {
    /// Decide what to do after attempt number `attempt` (1-indexed) failed
    /// with `code` on `method`
    ///
    /// Returns the delay before the next attempt, or `None` to stop and
    /// surface the error.
    fn decide(&self, code: StatusCode, method: &str, attempt: u32) -> Option<Duration>;

    /// Upper bound on the number of attempts of one logical call
    fn max_attempts(&self) -> u32;
}

/// Retries eligible failures up to a fixed number of attempts
///
/// # Example
///
/// ```rust
/// use scs_core::call::methods;
/// use scs_core::retry::{FixedCountRetryStrategy, RetryStrategy};
/// use scs_core::StatusCode;
/// use std::time::Duration;
///
/// let strategy = FixedCountRetryStrategy::default();
///
/// assert_eq!(
///     strategy.decide(StatusCode::Unavailable, methods::GET, 1),
///     Some(Duration::ZERO)
/// );
/// assert_eq!(strategy.decide(StatusCode::Unavailable, methods::INCREMENT, 1), None);
/// ```
#[derive(Debug, Clone)]
pub struct FixedCountRetryStrategy {
    eligibility: Arc<EligibilityPolicy>,
    max_attempts: u32,
    backoff: Backoff,
}

impl Default for FixedCountRetryStrategy {
    fn default() -> Self {
        Self {
            eligibility: Arc::new(EligibilityPolicy::default()),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: Backoff::none(),
        }
    }
}

impl FixedCountRetryStrategy {
    /// Create a strategy with the default eligibility policy
    ///
    /// `max_attempts` is clamped to at least 1.
    pub fn new(max_attempts: u32) -> Self {
        Self::default().with_max_attempts(max_attempts)
    }

    /// Copy of this strategy with a different attempt budget
    pub fn with_max_attempts(&self, max_attempts: u32) -> Self {
        Self {
            eligibility: Arc::clone(&self.eligibility),
            max_attempts: max_attempts.max(1),
            backoff: self.backoff.clone(),
        }
    }

    /// Copy of this strategy with a different eligibility policy
    pub fn with_eligibility_policy(&self, policy: EligibilityPolicy) -> Self {
        Self {
            eligibility: Arc::new(policy),
            max_attempts: self.max_attempts,
            backoff: self.backoff.clone(),
        }
    }

    /// Copy of this strategy that waits according to `backoff` between
    /// attempts
    pub fn with_backoff(&self, backoff: Backoff) -> Self {
        Self {
            eligibility: Arc::clone(&self.eligibility),
            max_attempts: self.max_attempts,
            backoff,
        }
    }

    pub fn eligibility(&self) -> &EligibilityPolicy {
        &self.eligibility
    }

    pub fn backoff(&self) -> &Backoff {
        &self.backoff
    }
}

impl RetryStrategy for FixedCountRetryStrategy {
    fn decide(&self, code: StatusCode, method: &str, attempt: u32) -> Option<Duration> {
        if !self.eligibility.is_eligible(code, method, attempt) {
            tracing::debug!(
                method = method,
                code = %code,
                attempt = attempt,
                "request is not eligible for retry"
            );
            return None;
        }

        if attempt > self.max_attempts {
            tracing::debug!(
                method = method,
                attempt = attempt,
                max_attempts = self.max_attempts,
                "retry budget exceeded"
            );
            return None;
        }

        Some(calculate_delay(&self.backoff, attempt))
    }

    fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}
