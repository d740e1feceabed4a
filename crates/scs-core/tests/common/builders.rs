//! Builders for calls and transport outcomes

#![allow(dead_code)]

use scs_core::{Metadata, Status, StatusCode, UnaryCall, UnaryResponse};

pub type Outcome = Result<UnaryResponse, Status>;

pub fn ok(payload: &[u8]) -> Outcome {
    Ok(UnaryResponse::new(payload.to_vec()))
}

pub fn fail(code: StatusCode, details: &str) -> Outcome {
    Err(Status::new(code, details))
}

pub fn unavailable() -> Outcome {
    fail(StatusCode::Unavailable, "server is restarting")
}

pub fn internal() -> Outcome {
    fail(StatusCode::Internal, "stream reset")
}

/// Failure carrying a service error code in the `err` metadata entry
pub fn fail_with_err(code: StatusCode, details: &str, err: &str) -> Outcome {
    let mut metadata = Metadata::new();
    metadata.insert("err", err);
    Err(Status::new(code, details).with_metadata(metadata))
}

/// A call to `method` carrying a `cache` header
pub fn cache_call(method: &str, cache_name: &str) -> UnaryCall {
    let mut metadata = Metadata::new();
    metadata.insert("cache", cache_name);
    UnaryCall::new(method, b"payload".to_vec()).with_metadata(metadata)
}
