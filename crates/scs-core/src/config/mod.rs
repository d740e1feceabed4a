//! Client configuration loading and types

mod loader;
mod types;

pub use loader::{
    ConfigLoader, ENV_BACKOFF_STRATEGY, ENV_MAX_ATTEMPTS, ENV_READ_CONCERN,
    ENV_REQUEST_TIMEOUT_MS,
};
pub use types::{ClientConfig, RetryConfig, TransportConfig};
