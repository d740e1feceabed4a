//! Retry observation and logging
//!
//! The pipeline reports every attempt of a logical call to a
//! [`RetryObserver`]. Observation is best-effort: nothing in the retry loop
//! depends on what an observer does.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use crate::status::StatusCode;

/// Observer trait for retry attempt events
///
/// # Example
///
/// ```rust
/// use scs_core::retry::RetryObserver;
/// use scs_core::StatusCode;
/// use std::time::Duration;
///
/// struct MetricsObserver;
///
/// impl RetryObserver for MetricsObserver {
///     fn on_attempt_start(&self, method: &str, attempt: u32, max_attempts: u32) {}
///
///     fn on_attempt_failed(&self, method: &str, attempt: u32, code: StatusCode, delay: Duration) {}
///
///     fn on_success(&self, method: &str, attempt: u32, total_duration: Duration) {}
///
///     fn on_exhausted(&self, method: &str, attempts: u32, code: StatusCode) {}
/// }
/// ```
pub trait RetryObserver: Send + Sync {
    /// An attempt is about to be sent to the transport
    fn on_attempt_start(&self, method: &str, attempt: u32, max_attempts: u32);

    /// An attempt failed and will be retried after `delay`
    fn on_attempt_failed(&self, method: &str, attempt: u32, code: StatusCode, delay: Duration);

    /// The logical call succeeded on `attempt`
    fn on_success(&self, method: &str, attempt: u32, total_duration: Duration);

    /// The attempt budget ran out
    fn on_exhausted(&self, method: &str, attempts: u32, code: StatusCode);

    /// The strategy declined to retry a failed attempt
    fn on_abandoned(&self, method: &str, attempt: u32, code: StatusCode) {
        let _ = (method, attempt, code);
    }

    /// The caller cancelled the logical call
    fn on_cancelled(&self, method: &str, attempt: u32) {
        let _ = (method, attempt);
    }
}

/// A no-op observer
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl RetryObserver for NoOpObserver {
    fn on_attempt_start(&self, _method: &str, _attempt: u32, _max_attempts: u32) {}

    fn on_attempt_failed(&self, _method: &str, _attempt: u32, _code: StatusCode, _delay: Duration) {}

    fn on_success(&self, _method: &str, _attempt: u32, _total_duration: Duration) {}

    fn on_exhausted(&self, _method: &str, _attempts: u32, _code: StatusCode) {}
}

/// An observer that logs retry events using the `tracing` crate
///
/// # Log Levels
///
/// - `on_attempt_start`: TRACE
/// - `on_attempt_failed`: WARN
/// - `on_success`: INFO after a retry, TRACE otherwise
/// - `on_exhausted`: ERROR
/// - `on_abandoned`: DEBUG
/// - `on_cancelled`: DEBUG
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl TracingObserver {
    pub fn new() -> Self {
        Self
    }
}

impl RetryObserver for TracingObserver {
    fn on_attempt_start(&self, method: &str, attempt: u32, max_attempts: u32) {
        tracing::trace!(
            method = method,
            attempt = attempt,
            max_attempts = max_attempts,
            "starting attempt"
        );
    }

    fn on_attempt_failed(&self, method: &str, attempt: u32, code: StatusCode, delay: Duration) {
        tracing::warn!(
            method = method,
            attempt = attempt,
            code = %code,
            delay_ms = delay.as_millis() as u64,
            "attempt failed, will retry"
        );
    }

    fn on_success(&self, method: &str, attempt: u32, total_duration: Duration) {
        if attempt > 1 {
            tracing::info!(
                method = method,
                attempt = attempt,
                total_duration_ms = total_duration.as_millis() as u64,
                "succeeded after retry"
            );
        } else {
            tracing::trace!(
                method = method,
                duration_ms = total_duration.as_millis() as u64,
                "succeeded on first attempt"
            );
        }
    }

    fn on_exhausted(&self, method: &str, attempts: u32, code: StatusCode) {
        tracing::error!(
            method = method,
            attempts = attempts,
            code = %code,
            "all retry attempts exhausted"
        );
    }

    fn on_abandoned(&self, method: &str, attempt: u32, code: StatusCode) {
        tracing::debug!(
            method = method,
            attempt = attempt,
            code = %code,
            "not retrying failed attempt"
        );
    }

    fn on_cancelled(&self, method: &str, attempt: u32) {
        tracing::debug!(method = method, attempt = attempt, "call cancelled");
    }
}

/// An observer that counts retry events
///
/// Useful for testing and metrics collection.
#[derive(Debug, Default)]
pub struct StatsObserver {
    attempt_starts: AtomicU32,
    failures: AtomicU32,
    successes: AtomicU32,
    exhaustions: AtomicU32,
    abandonments: AtomicU32,
    cancellations: AtomicU32,
}

impl StatsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempt_starts(&self) -> u32 {
        self.attempt_starts.load(Ordering::SeqCst)
    }

    pub fn failures(&self) -> u32 {
        self.failures.load(Ordering::SeqCst)
    }

    pub fn successes(&self) -> u32 {
        self.successes.load(Ordering::SeqCst)
    }

    pub fn exhaustions(&self) -> u32 {
        self.exhaustions.load(Ordering::SeqCst)
    }

    pub fn abandonments(&self) -> u32 {
        self.abandonments.load(Ordering::SeqCst)
    }

    pub fn cancellations(&self) -> u32 {
        self.cancellations.load(Ordering::SeqCst)
    }
}

impl RetryObserver for StatsObserver {
    fn on_attempt_start(&self, _method: &str, _attempt: u32, _max_attempts: u32) {
        self.attempt_starts.fetch_add(1, Ordering::SeqCst);
    }

    fn on_attempt_failed(&self, _method: &str, _attempt: u32, _code: StatusCode, _delay: Duration) {
        self.failures.fetch_add(1, Ordering::SeqCst);
    }

    fn on_success(&self, _method: &str, _attempt: u32, _total_duration: Duration) {
        self.successes.fetch_add(1, Ordering::SeqCst);
    }

    fn on_exhausted(&self, _method: &str, _attempts: u32, _code: StatusCode) {
        self.exhaustions.fetch_add(1, Ordering::SeqCst);
    }

    fn on_abandoned(&self, _method: &str, _attempt: u32, _code: StatusCode) {
        self.abandonments.fetch_add(1, Ordering::SeqCst);
    }

    fn on_cancelled(&self, _method: &str, _attempt: u32) {
        self.cancellations.fetch_add(1, Ordering::SeqCst);
    }
}

impl<T: RetryObserver + ?Sized> RetryObserver for std::sync::Arc<T> {
    fn on_attempt_start(&self, method: &str, attempt: u32, max_attempts: u32) {
        (**self).on_attempt_start(method, attempt, max_attempts)
    }

    fn on_attempt_failed(&self, method: &str, attempt: u32, code: StatusCode, delay: Duration) {
        (**self).on_attempt_failed(method, attempt, code, delay)
    }

    fn on_success(&self, method: &str, attempt: u32, total_duration: Duration) {
        (**self).on_success(method, attempt, total_duration)
    }

    fn on_exhausted(&self, method: &str, attempts: u32, code: StatusCode) {
        (**self).on_exhausted(method, attempts, code)
    }

    fn on_abandoned(&self, method: &str, attempt: u32, code: StatusCode) {
        (**self).on_abandoned(method, attempt, code)
    }

    fn on_cancelled(&self, method: &str, attempt: u32) {
        (**self).on_cancelled(method, attempt)
    }
}
