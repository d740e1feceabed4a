//! Common test utilities for scs-core
//!
//! This module provides shared test infrastructure including:
//! - A scripted transport that records every invocation
//! - Call and status builders
//! - Tracing setup for tests that want log output

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod builders;
pub mod mocks;

pub use builders::*;
pub use mocks::*;

/// Install a test subscriber honoring `RUST_LOG`; safe to call repeatedly
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
