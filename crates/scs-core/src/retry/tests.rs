//! Tests combining eligibility, strategy and backoff
//!
//! These check the decision table as a whole: for every status code and
//! method the strategy either stops or authorizes a retry, and never
//! authorizes an attempt past its budget.

use std::time::Duration;

use crate::call::methods;
use crate::retry::{
    Backoff, EligibilityPolicy, FixedCountRetryStrategy, RetryStrategy,
    DEFAULT_RETRYABLE_METHODS,
};
use crate::status::StatusCode;

fn every_status_code() -> Vec<StatusCode> {
    (0..=16).map(StatusCode::from_i32).collect()
}

// ============================================================================
// Decision table
// ============================================================================

#[test]
fn test_decide_matches_eligibility_within_budget() {
    let policy = EligibilityPolicy::default();
    let strategy = FixedCountRetryStrategy::new(4);

    for code in every_status_code() {
        for method in DEFAULT_RETRYABLE_METHODS
            .iter()
            .copied()
            .chain([methods::INCREMENT, methods::LIST_POP_BACK])
        {
            for attempt in 1..=4 {
                let decision = strategy.decide(code, method, attempt);
                assert_eq!(
                    decision.is_some(),
                    policy.is_eligible(code, method, attempt),
                    "code {} method {} attempt {}",
                    code,
                    method,
                    attempt
                );
                if let Some(delay) = decision {
                    assert_eq!(delay, Duration::ZERO);
                }
            }
        }
    }
}

#[test]
fn test_decide_never_exceeds_budget() {
    for max_attempts in 1..=5 {
        let strategy = FixedCountRetryStrategy::new(max_attempts);
        for code in every_status_code() {
            for attempt in (max_attempts + 1)..=(max_attempts + 3) {
                assert!(strategy.decide(code, methods::SET, attempt).is_none());
            }
        }
    }
}

// ============================================================================
// Copy-on-write reconfiguration
// ============================================================================

#[test]
fn test_two_reconfigurations_are_independent() {
    let base = FixedCountRetryStrategy::default();

    let a = base
        .with_max_attempts(7)
        .with_backoff(Backoff::fixed(Duration::from_millis(5)));
    let b = base
        .with_max_attempts(2)
        .with_eligibility_policy(EligibilityPolicy::new([StatusCode::Aborted], [methods::GET]));

    assert_eq!(a.max_attempts(), 7);
    assert_eq!(b.max_attempts(), 2);
    assert_eq!(base.max_attempts(), 3);

    assert_eq!(
        a.decide(StatusCode::Unavailable, methods::SET, 1),
        Some(Duration::from_millis(5))
    );
    assert_eq!(b.decide(StatusCode::Unavailable, methods::SET, 1), None);
    assert_eq!(
        b.decide(StatusCode::Aborted, methods::GET, 1),
        Some(Duration::ZERO)
    );
    assert_eq!(
        base.decide(StatusCode::Unavailable, methods::SET, 1),
        Some(Duration::ZERO)
    );
}

#[test]
fn test_strategy_usable_as_trait_object() {
    let strategy: Box<dyn RetryStrategy> = Box::new(FixedCountRetryStrategy::new(2));
    assert_eq!(strategy.max_attempts(), 2);
    assert!(strategy
        .decide(StatusCode::Internal, methods::LIST_FETCH, 1)
        .is_some());
    assert!(strategy
        .decide(StatusCode::Internal, methods::LIST_PUSH_FRONT, 1)
        .is_none());
}
