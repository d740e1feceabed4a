//! Call descriptors for unary RPCs

use std::fmt;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::metadata::Metadata;

/// Fully qualified method identifiers of the cache service
pub mod methods {
    pub const GET: &str = "/cache_client.Scs/Get";
    pub const SET: &str = "/cache_client.Scs/Set";
    pub const DELETE: &str = "/cache_client.Scs/Delete";
    pub const INCREMENT: &str = "/cache_client.Scs/Increment";
    pub const SET_IF_NOT_EXISTS: &str = "/cache_client.Scs/SetIfNotExists";
    pub const KEYS_EXIST: &str = "/cache_client.Scs/KeysExist";
    pub const ITEM_GET_TYPE: &str = "/cache_client.Scs/ItemGetType";
    pub const ITEM_GET_TTL: &str = "/cache_client.Scs/ItemGetTtl";

    pub const DICTIONARY_SET: &str = "/cache_client.Scs/DictionarySet";
    pub const DICTIONARY_GET: &str = "/cache_client.Scs/DictionaryGet";
    pub const DICTIONARY_FETCH: &str = "/cache_client.Scs/DictionaryFetch";
    pub const DICTIONARY_DELETE: &str = "/cache_client.Scs/DictionaryDelete";
    pub const DICTIONARY_INCREMENT: &str = "/cache_client.Scs/DictionaryIncrement";

    pub const SET_UNION: &str = "/cache_client.Scs/SetUnion";
    pub const SET_DIFFERENCE: &str = "/cache_client.Scs/SetDifference";
    pub const SET_FETCH: &str = "/cache_client.Scs/SetFetch";

    pub const SORTED_SET_FETCH: &str = "/cache_client.Scs/SortedSetFetch";
    pub const SORTED_SET_GET_SCORE: &str = "/cache_client.Scs/SortedSetGetScore";
    pub const SORTED_SET_GET_RANK: &str = "/cache_client.Scs/SortedSetGetRank";

    pub const LIST_PUSH_FRONT: &str = "/cache_client.Scs/ListPushFront";
    pub const LIST_PUSH_BACK: &str = "/cache_client.Scs/ListPushBack";
    pub const LIST_POP_FRONT: &str = "/cache_client.Scs/ListPopFront";
    pub const LIST_POP_BACK: &str = "/cache_client.Scs/ListPopBack";
    pub const LIST_CONCATENATE_FRONT: &str = "/cache_client.Scs/ListConcatenateFront";
    pub const LIST_CONCATENATE_BACK: &str = "/cache_client.Scs/ListConcatenateBack";
    pub const LIST_FETCH: &str = "/cache_client.Scs/ListFetch";
    pub const LIST_REMOVE: &str = "/cache_client.Scs/ListRemove";
    pub const LIST_LENGTH: &str = "/cache_client.Scs/ListLength";
}

/// Identifier of an RPC method, e.g. `/cache_client.Scs/Set`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodId(String);

impl MethodId {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short method name without the service prefix (`Set` for
    /// `/cache_client.Scs/Set`)
    pub fn short_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl AsRef<str> for MethodId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MethodId {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// Per-call options handed to the transport
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Per-attempt deadline enforced by the transport
    pub timeout: Option<Duration>,
    /// Cancels the logical call; observed before each attempt and while
    /// waiting between attempts
    pub cancellation: Option<CancellationToken>,
}

impl CallOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }
}

/// A single unary call: method, opaque payload, metadata and options
#[derive(Debug, Clone)]
pub struct UnaryCall {
    pub method: MethodId,
    pub payload: Vec<u8>,
    pub metadata: Metadata,
    pub options: CallOptions,
}

impl UnaryCall {
    pub fn new(method: impl Into<MethodId>, payload: Vec<u8>) -> Self {
        Self {
            method: method.into(),
            payload,
            metadata: Metadata::new(),
            options: CallOptions::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_options(mut self, options: CallOptions) -> Self {
        self.options = options;
        self
    }
}

/// Successful transport response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnaryResponse {
    pub payload: Vec<u8>,
    pub metadata: Metadata,
}

impl UnaryResponse {
    pub fn new(payload: Vec<u8>) -> Self {
        Self {
            payload,
            metadata: Metadata::new(),
        }
    }
}
