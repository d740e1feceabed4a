//! Request and response messages for cache operations
//!
//! Every request type names the service method it is sent to and the
//! response type it decodes into through [`CacheRequest`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use scs_core::methods;

/// A request bound to one service method
pub trait CacheRequest: Serialize {
    /// Full method path, e.g. `/cache_client.Scs/Get`
    const METHOD: &'static str;

    type Response: DeserializeOwned;
}

macro_rules! cache_request {
    ($request:ty => $response:ty, $method:expr) => {
        impl CacheRequest for $request {
            const METHOD: &'static str = $method;
            type Response = $response;
        }
    };
}

// Scalar items

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetRequest {
    pub key: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "kebab-case")]
pub enum GetResponse {
    Hit { value: Vec<u8> },
    Miss,
}

impl GetResponse {
    /// The value on a hit
    pub fn value(&self) -> Option<&[u8]> {
        match self {
            Self::Hit { value } => Some(value),
            Self::Miss => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetRequest {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
    pub ttl_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetResponse {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub key: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncrementRequest {
    pub field: Vec<u8>,
    pub amount: i64,
    pub ttl_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncrementResponse {
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetIfNotExistsRequest {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
    pub ttl_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "kebab-case")]
pub enum SetIfNotExistsResponse {
    Stored,
    NotStored,
}

// Lists

/// Push to the front; the back is trimmed to `truncate_back_to_size`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPushFrontRequest {
    pub list_name: Vec<u8>,
    pub value: Vec<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncate_back_to_size: Option<u32>,
    pub ttl_ms: u64,
    pub refresh_ttl: bool,
}

/// Push to the back; the front is trimmed to `truncate_front_to_size`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPushBackRequest {
    pub list_name: Vec<u8>,
    pub value: Vec<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncate_front_to_size: Option<u32>,
    pub ttl_ms: u64,
    pub refresh_ttl: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPushResponse {
    pub list_length: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPopFrontRequest {
    pub list_name: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPopBackRequest {
    pub list_name: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "kebab-case")]
pub enum ListPopResponse {
    Hit { value: Vec<u8>, list_length: u32 },
    Miss,
}

/// Fetch a slice of a list; indices follow slice semantics and may be
/// negative to count from the end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFetchRequest {
    pub list_name: Vec<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_index: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "kebab-case")]
pub enum ListFetchResponse {
    Hit { values: Vec<Vec<u8>> },
    Miss,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListLengthRequest {
    pub list_name: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "kebab-case")]
pub enum ListLengthResponse {
    Hit { length: u32 },
    Miss,
}

cache_request!(GetRequest => GetResponse, methods::GET);
cache_request!(SetRequest => SetResponse, methods::SET);
cache_request!(DeleteRequest => DeleteResponse, methods::DELETE);
cache_request!(IncrementRequest => IncrementResponse, methods::INCREMENT);
cache_request!(SetIfNotExistsRequest => SetIfNotExistsResponse, methods::SET_IF_NOT_EXISTS);
cache_request!(ListPushFrontRequest => ListPushResponse, methods::LIST_PUSH_FRONT);
cache_request!(ListPushBackRequest => ListPushResponse, methods::LIST_PUSH_BACK);
cache_request!(ListPopFrontRequest => ListPopResponse, methods::LIST_POP_FRONT);
cache_request!(ListPopBackRequest => ListPopResponse, methods::LIST_POP_BACK);
cache_request!(ListFetchRequest => ListFetchResponse, methods::LIST_FETCH);
cache_request!(ListLengthRequest => ListLengthResponse, methods::LIST_LENGTH);
