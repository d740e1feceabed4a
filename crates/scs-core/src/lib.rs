//! # scs-core
//!
//! Core library for the SCS cache SDK providing:
//! - The unary call pipeline: header interceptors composed around a transport
//! - Retry eligibility and retry strategies keyed by status code and method
//! - Translation of failed transport statuses into typed SDK errors
//! - Client configuration types and the configuration loader

pub mod call;
pub mod config;
pub mod error;
pub mod interceptor;
pub mod metadata;
pub mod pipeline;
pub mod retry;
pub mod sdk_error;
pub mod status;
pub mod transport;

pub use call::{methods, CallOptions, MethodId, UnaryCall, UnaryResponse};
pub use config::{ClientConfig, ConfigLoader};
pub use error::{Error, Result};
pub use metadata::Metadata;
pub use pipeline::{UnaryPipeline, UnaryPipelineBuilder};
pub use sdk_error::{ErrorConverter, ErrorKind, SdkError};
pub use status::{Status, StatusCode};
pub use transport::Transport;

/// Re-exported so callers can cancel in-flight calls without depending on
/// `tokio-util` directly.
pub use tokio_util::sync::CancellationToken;
