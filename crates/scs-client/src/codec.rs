//! Message encoding
//!
//! The pipeline carries opaque payload bytes; a [`Codec`] turns typed
//! requests into those bytes and decodes responses back.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use scs_core::{ErrorKind, SdkError};

/// Encoding or decoding failure
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to encode {type_name}: {source}")]
    Encode {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode {type_name}: {source}")]
    Decode {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl From<CodecError> for SdkError {
    fn from(err: CodecError) -> Self {
        let kind = match err {
            CodecError::Encode { .. } => ErrorKind::ClientSdk,
            CodecError::Decode { .. } => ErrorKind::UnknownService,
        };
        SdkError::new(kind, err.to_string()).with_source(err)
    }
}

/// Payload encoding used by a client
pub trait Codec: Send + Sync + std::fmt::Debug {
    fn encode<T: Serialize>(&self, message: &T) -> Result<Vec<u8>, CodecError>;

    fn decode<T: DeserializeOwned>(&self, payload: &[u8]) -> Result<T, CodecError>;
}

/// JSON payloads via `serde_json`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, message: &T) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(message).map_err(|source| CodecError::Encode {
            type_name: std::any::type_name::<T>(),
            source,
        })
    }

    fn decode<T: DeserializeOwned>(&self, payload: &[u8]) -> Result<T, CodecError> {
        serde_json::from_slice(payload).map_err(|source| CodecError::Decode {
            type_name: std::any::type_name::<T>(),
            source,
        })
    }
}
