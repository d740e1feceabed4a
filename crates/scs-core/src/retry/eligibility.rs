//! Retry eligibility by status code and method
//!
//! A failed attempt may only be retried when both its status code and its
//! method are known to be safe to repeat. Status eligibility screens out
//! errors that will fail the same way again; method eligibility screens out
//! operations whose re-execution would change the result.

use std::collections::HashSet;

use crate::call::methods;
use crate::status::StatusCode;

/// Status codes that are retried by default
pub const DEFAULT_RETRYABLE_STATUS_CODES: &[StatusCode] =
    &[StatusCode::Unavailable, StatusCode::Internal];

/// Idempotent methods that are retried by default
///
/// Not included because repeating them changes the result:
/// `Increment`, `DictionaryIncrement`, `SetIfNotExists`, `ListPushFront`,
/// `ListPushBack`, `ListPopFront`, `ListPopBack`, `ListConcatenateFront`,
/// `ListConcatenateBack`.
///
/// `ListRemove` currently removes every occurrence of a value, which is
/// idempotent. If removal of only the first or last N occurrences is added it
/// stops being idempotent and must be dropped from this list.
pub const DEFAULT_RETRYABLE_METHODS: &[&str] = &[
    methods::SET,
    methods::GET,
    methods::DELETE,
    methods::KEYS_EXIST,
    methods::ITEM_GET_TYPE,
    methods::ITEM_GET_TTL,
    methods::DICTIONARY_SET,
    methods::DICTIONARY_GET,
    methods::DICTIONARY_FETCH,
    methods::DICTIONARY_DELETE,
    methods::SET_UNION,
    methods::SET_DIFFERENCE,
    methods::SET_FETCH,
    methods::SORTED_SET_FETCH,
    methods::SORTED_SET_GET_SCORE,
    methods::SORTED_SET_GET_RANK,
    methods::LIST_FETCH,
    methods::LIST_REMOVE,
    methods::LIST_LENGTH,
];

/// Decides whether a failed attempt may be retried at all
///
/// The configuration is fixed at construction; `is_eligible` is a pure
/// function of its inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityPolicy {
    retryable_status_codes: HashSet<StatusCode>,
    retryable_methods: HashSet<String>,
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_RETRYABLE_STATUS_CODES.iter().copied(),
            DEFAULT_RETRYABLE_METHODS.iter().copied(),
        )
    }
}

impl EligibilityPolicy {
    /// Create a policy from explicit status and method sets
    pub fn new<C, M, S>(status_codes: C, methods: M) -> Self
    where
        C: IntoIterator<Item = StatusCode>,
        M: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            retryable_status_codes: status_codes.into_iter().collect(),
            retryable_methods: methods.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether an attempt that failed with `code` on `method` may be retried
    ///
    /// `attempt` is the number of attempts already made. The default policy
    /// does not consult it.
    pub fn is_eligible(&self, code: StatusCode, method: &str, attempt: u32) -> bool {
        let _ = attempt;
        self.retryable_status_codes.contains(&code) && self.retryable_methods.contains(method)
    }

    /// Copy of this policy that also retries `method`
    pub fn with_method(&self, method: impl Into<String>) -> Self {
        let mut policy = self.clone();
        policy.retryable_methods.insert(method.into());
        policy
    }

    /// Copy of this policy that never retries `method`
    pub fn without_method(&self, method: &str) -> Self {
        let mut policy = self.clone();
        policy.retryable_methods.remove(method);
        policy
    }

    /// Copy of this policy with a different set of retryable status codes
    pub fn with_status_codes(&self, codes: impl IntoIterator<Item = StatusCode>) -> Self {
        Self {
            retryable_status_codes: codes.into_iter().collect(),
            retryable_methods: self.retryable_methods.clone(),
        }
    }

    pub fn is_retryable_status(&self, code: StatusCode) -> bool {
        self.retryable_status_codes.contains(&code)
    }

    pub fn is_retryable_method(&self, method: &str) -> bool {
        self.retryable_methods.contains(method)
    }
}
