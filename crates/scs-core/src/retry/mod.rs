//! Retry policy for unary calls
//!
//! This module decides whether a failed attempt of a logical call is retried
//! and how long to wait first. The loop that acts on these decisions lives in
//! [`crate::pipeline`].
//!
//! # Features
//!
//! - [`EligibilityPolicy`]: retryable status codes and idempotent methods
//! - [`RetryStrategy`] trait with the default [`FixedCountRetryStrategy`]
//! - Opt-in [`Backoff`] between attempts (immediate retry by default)
//! - Observable attempts via the [`RetryObserver`] trait, with the built-in
//!   [`TracingObserver`] for logging
//!
//! # Example
//!
//! ```rust
//! use scs_core::call::methods;
//! use scs_core::retry::{EligibilityPolicy, FixedCountRetryStrategy, RetryStrategy};
//! use scs_core::StatusCode;
//!
//! let strategy = FixedCountRetryStrategy::default()
//!     .with_max_attempts(5)
//!     .with_eligibility_policy(EligibilityPolicy::default().without_method(methods::DELETE));
//!
//! assert!(strategy.decide(StatusCode::Internal, methods::DELETE, 1).is_none());
//! ```

mod backoff;
mod eligibility;
mod observer;
mod strategy;

pub use backoff::{calculate_delay, Backoff, BackoffStrategy};
pub use eligibility::{EligibilityPolicy, DEFAULT_RETRYABLE_METHODS, DEFAULT_RETRYABLE_STATUS_CODES};
pub use observer::{NoOpObserver, RetryObserver, StatsObserver, TracingObserver};
pub use strategy::{FixedCountRetryStrategy, RetryStrategy, DEFAULT_MAX_ATTEMPTS};

#[cfg(test)]
mod tests;
