//! Translation of failed transport statuses into typed SDK errors

use crate::metadata::Metadata;
use crate::status::{Status, StatusCode};

use super::{ErrorKind, SdkError};

/// Maps a transport status to an [`SdkError`]
///
/// Conversion never fails: every status code, including ones the service is
/// not expected to return, maps to some [`ErrorKind`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorConverter;

impl ErrorConverter {
    pub fn new() -> Self {
        Self
    }

    /// The error kind a status code translates to
    pub fn kind_for(code: StatusCode) -> ErrorKind {
        match code {
            StatusCode::InvalidArgument | StatusCode::Unimplemented | StatusCode::OutOfRange => {
                ErrorKind::BadRequest
            }
            StatusCode::FailedPrecondition => ErrorKind::FailedPrecondition,
            StatusCode::Cancelled => ErrorKind::Cancelled,
            StatusCode::DeadlineExceeded => ErrorKind::Timeout,
            StatusCode::PermissionDenied => ErrorKind::Permission,
            StatusCode::Unauthenticated => ErrorKind::Authentication,
            StatusCode::ResourceExhausted => ErrorKind::LimitExceeded,
            StatusCode::NotFound => ErrorKind::NotFound,
            StatusCode::AlreadyExists => ErrorKind::AlreadyExists,
            StatusCode::Aborted | StatusCode::Internal | StatusCode::DataLoss => {
                ErrorKind::InternalServer
            }
            StatusCode::Unavailable => ErrorKind::ServerUnavailable,
            StatusCode::Unknown | StatusCode::Ok => ErrorKind::UnknownService,
        }
    }

    /// Convert a status code, its details and trailing metadata
    pub fn convert(&self, code: StatusCode, details: &str, metadata: Metadata) -> SdkError {
        let kind = Self::kind_for(code);
        let message = if details.is_empty() {
            kind.description().to_string()
        } else {
            format!("{}: {}", kind.description(), details)
        };
        SdkError::new(kind, message).with_status(code, metadata)
    }

    /// Convert an owned [`Status`]
    pub fn convert_status(&self, status: Status) -> SdkError {
        let (code, details, metadata) = status.into_parts();
        self.convert(code, &details, metadata)
    }
}
