//! Common test utilities for scs-client

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod mocks;

pub use mocks::*;

use std::sync::Arc;

use scs_client::{CacheClient, CredentialProvider};
use scs_core::Transport;

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_ENDPOINT: &str = "cell-1.example.com";

pub fn test_credentials() -> CredentialProvider {
    CredentialProvider::with_endpoint(TEST_API_KEY, TEST_ENDPOINT).expect("valid credentials")
}

/// Client with default configuration over `transport`
pub fn test_client(transport: Arc<dyn Transport>) -> CacheClient {
    CacheClient::builder()
        .credentials(test_credentials())
        .transport(transport)
        .build()
        .expect("client should build")
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
