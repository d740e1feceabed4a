//! # scs-client
//!
//! Cache client for the SCS managed cache service.
//!
//! A [`CacheClient`] validates arguments locally, encodes typed requests with
//! a [`Codec`], and sends them through the `scs-core` unary pipeline, which
//! handles header propagation, retries and error translation.
//!
//! ```rust,no_run
//! use scs_client::{CacheClient, CredentialProvider, GetResponse};
//! use scs_core::Transport;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! async fn example(transport: Arc<dyn Transport>) -> Result<(), scs_core::SdkError> {
//!     let client = CacheClient::builder()
//!         .credentials(CredentialProvider::from_env_var("SCS_API_KEY")?)
//!         .transport(transport)
//!         .default_ttl(Duration::from_secs(60))
//!         .build()?;
//!
//!     client.set("users", "alice", "online", None).await?;
//!     if let GetResponse::Hit { value } = client.get("users", "alice").await? {
//!         println!("{}", String::from_utf8_lossy(&value));
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod codec;
pub mod credentials;
pub mod messages;
pub mod validation;

pub use client::{CacheClient, CacheClientBuilder, CACHE_HEADER};
pub use codec::{Codec, CodecError, JsonCodec};
pub use credentials::CredentialProvider;
pub use messages::{
    CacheRequest, DeleteResponse, GetResponse, IncrementResponse, ListFetchResponse, ListLengthResponse,
    ListPopResponse, ListPushResponse, SetIfNotExistsResponse, SetResponse,
};
