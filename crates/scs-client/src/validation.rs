//! Local argument validation
//!
//! Failures here are [`ErrorKind::ClientSdk`](scs_core::ErrorKind::ClientSdk)
//! errors raised before anything is sent.

use std::time::Duration;

use scs_core::SdkError;

pub fn validate_cache_name(name: &str) -> Result<(), SdkError> {
    validate_name(name, "cache name")
}

pub fn validate_list_name(name: &str) -> Result<(), SdkError> {
    validate_name(name, "list name")
}

fn validate_name(name: &str, what: &str) -> Result<(), SdkError> {
    if name.trim().is_empty() {
        return Err(SdkError::invalid_argument(format!(
            "{} must not be empty or blank",
            what
        )));
    }
    Ok(())
}

/// TTL as whole milliseconds; a given TTL must be at least 1 ms
pub fn validate_ttl(ttl: Duration) -> Result<u64, SdkError> {
    let millis = ttl.as_millis();
    if millis == 0 {
        return Err(SdkError::invalid_argument("TTL must be greater than 0"));
    }
    Ok(u64::try_from(millis).unwrap_or(u64::MAX))
}

pub fn validate_truncate_size(size: Option<u32>) -> Result<(), SdkError> {
    if size == Some(0) {
        return Err(SdkError::invalid_argument(
            "truncate-to-size must be greater than 0",
        ));
    }
    Ok(())
}
