//! API key and endpoint resolution
//!
//! Accepts either an encoded API token, which carries its own endpoint, or a
//! raw API key paired with an explicit endpoint. The key is zeroed when the
//! provider is dropped and never appears in `Debug` output.

use std::env;
use std::fmt;

use base64::engine::general_purpose::{STANDARD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use scs_core::SdkError;
use serde::Deserialize;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Decoded API token body
#[derive(Deserialize, Zeroize, ZeroizeOnDrop)]
struct TokenPayload {
    endpoint: String,
    api_key: String,
}

/// Resolved credentials for a client
#[derive(Clone)]
pub struct CredentialProvider {
    api_key: Zeroizing<String>,
    cache_endpoint: String,
    control_endpoint: String,
}

impl CredentialProvider {
    /// Parse an encoded API token
    ///
    /// The token is base64 (standard or URL-safe) over the JSON object
    /// `{"endpoint": ..., "api_key": ...}`.
    pub fn from_string(token: &str) -> Result<Self, SdkError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(SdkError::invalid_argument("API token must not be empty"));
        }

        let decoded = Zeroizing::new(decode_token(token).ok_or_else(|| {
            SdkError::invalid_argument("API token is not valid base64")
        })?);

        let mut payload: TokenPayload = serde_json::from_slice(&decoded).map_err(|e| {
            SdkError::invalid_argument("API token does not contain an endpoint and api_key")
                .with_source(e)
        })?;

        let api_key = Zeroizing::new(std::mem::take(&mut payload.api_key));
        Self::build(api_key, &payload.endpoint)
    }

    /// Read an encoded API token from the environment variable `name`
    pub fn from_env_var(name: &str) -> Result<Self, SdkError> {
        let token = Zeroizing::new(env::var(name).map_err(|_| {
            SdkError::invalid_argument(format!("environment variable {} is not set", name))
        })?);
        Self::from_string(&token)
    }

    /// Use a raw API key with an explicit service endpoint
    pub fn with_endpoint(api_key: impl Into<String>, endpoint: &str) -> Result<Self, SdkError> {
        Self::build(Zeroizing::new(api_key.into()), endpoint)
    }

    fn build(api_key: Zeroizing<String>, endpoint: &str) -> Result<Self, SdkError> {
        if api_key.trim().is_empty() {
            return Err(SdkError::invalid_argument("API key must not be empty"));
        }
        let endpoint = endpoint.trim().trim_end_matches('/');
        if endpoint.is_empty() {
            return Err(SdkError::invalid_argument("endpoint must not be empty"));
        }

        Ok(Self {
            api_key,
            cache_endpoint: format!("cache.{}", endpoint),
            control_endpoint: format!("control.{}", endpoint),
        })
    }

    /// API key sent in the `authorization` header (use with caution)
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Host serving data-plane calls
    pub fn cache_endpoint(&self) -> &str {
        &self.cache_endpoint
    }

    /// Host serving control-plane calls
    pub fn control_endpoint(&self) -> &str {
        &self.control_endpoint
    }
}

fn decode_token(token: &str) -> Option<Vec<u8>> {
    STANDARD
        .decode(token)
        .or_else(|_| URL_SAFE.decode(token))
        .or_else(|_| URL_SAFE_NO_PAD.decode(token))
        .ok()
}

impl fmt::Debug for CredentialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialProvider")
            .field("api_key", &"[REDACTED]")
            .field("cache_endpoint", &self.cache_endpoint)
            .field("control_endpoint", &self.control_endpoint)
            .finish()
    }
}
