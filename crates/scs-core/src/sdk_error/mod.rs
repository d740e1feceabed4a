//! Typed errors surfaced to SDK callers
//!
//! Every logical call either succeeds with a full response or fails with a
//! single [`SdkError`]. Errors originating from the service carry the status
//! code and trailing metadata of the final attempt; errors raised locally
//! (invalid arguments, cancellation before dispatch) carry none.

mod converter;

pub use converter::ErrorConverter;

use std::fmt;

use thiserror::Error;

use crate::metadata::Metadata;
use crate::status::StatusCode;

/// Classification of an [`SdkError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Local error such as an invalid argument; never retried
    ClientSdk,
    AlreadyExists,
    Authentication,
    BadRequest,
    Cancelled,
    FailedPrecondition,
    InternalServer,
    LimitExceeded,
    NotFound,
    Permission,
    ServerUnavailable,
    Timeout,
    UnknownService,
}

impl ErrorKind {
    /// Stable error code string exposed to callers
    pub fn code(self) -> &'static str {
        match self {
            Self::ClientSdk => "INVALID_ARGUMENT_ERROR",
            Self::AlreadyExists => "ALREADY_EXISTS_ERROR",
            Self::Authentication => "AUTHENTICATION_ERROR",
            Self::BadRequest => "BAD_REQUEST_ERROR",
            Self::Cancelled => "CANCELLATION_ERROR",
            Self::FailedPrecondition => "FAILED_PRECONDITION_ERROR",
            Self::InternalServer => "INTERNAL_SERVER_ERROR",
            Self::LimitExceeded => "LIMIT_EXCEEDED_ERROR",
            Self::NotFound => "NOT_FOUND_ERROR",
            Self::Permission => "PERMISSION_ERROR",
            Self::ServerUnavailable => "SERVER_UNAVAILABLE",
            Self::Timeout => "TIMEOUT_ERROR",
            Self::UnknownService => "UNKNOWN_SERVICE_ERROR",
        }
    }

    /// Human-readable prefix placed in front of the error details
    pub fn description(self) -> &'static str {
        match self {
            Self::ClientSdk => "Invalid argument passed to the client",
            Self::AlreadyExists => "A resource with that name already exists",
            Self::Authentication => "Invalid authentication credentials to connect to the cache service",
            Self::BadRequest => "The request was invalid; please contact support if the problem persists",
            Self::Cancelled => "The request was cancelled by the server or the caller",
            Self::FailedPrecondition => "System is not in a state required for the operation's execution",
            Self::InternalServer => "An unexpected error occurred while trying to fulfill the request",
            Self::LimitExceeded => "Request rate, bandwidth, or object size exceeded the limits for this account",
            Self::NotFound => "A cache with the specified name does not exist",
            Self::Permission => "Insufficient permissions to perform an operation on a cache",
            Self::ServerUnavailable => "The server was unable to handle the request; consider retrying",
            Self::Timeout => "The client's configured timeout was exceeded",
            Self::UnknownService => "Service returned an unknown response",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Terminal error of a logical call
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct SdkError {
    kind: ErrorKind,
    message: String,
    status_code: Option<StatusCode>,
    metadata: Metadata,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl SdkError {
    /// Create an error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: None,
            metadata: Metadata::new(),
            source: None,
        }
    }

    /// Create a local invalid-argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ClientSdk, message)
    }

    /// Create a cancellation error for a call abandoned by the caller
    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Cancelled, message)
    }

    pub(crate) fn with_status(mut self, code: StatusCode, metadata: Metadata) -> Self {
        self.status_code = Some(code);
        self.metadata = metadata;
        self
    }

    /// Attach an underlying cause
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Stable error code string, e.g. `INTERNAL_SERVER_ERROR`
    pub fn error_code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Status code of the final transport attempt, if the error came from the
    /// service
    pub fn status_code(&self) -> Option<StatusCode> {
        self.status_code
    }

    /// Trailing metadata of the final transport attempt
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Service-side error code carried in the `err` metadata entry
    pub fn service_error_code(&self) -> Option<&str> {
        self.metadata.get("err")
    }
}
