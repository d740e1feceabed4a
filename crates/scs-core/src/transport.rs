//! Transport trait definition

use async_trait::async_trait;

use crate::call::{UnaryCall, UnaryResponse};
use crate::status::Status;

/// A transport capable of performing one unary attempt
///
/// Implementations own framing, serialization of the envelope and the
/// per-attempt deadline in [`crate::CallOptions::timeout`]. A returned
/// [`Status`] must never carry [`crate::StatusCode::Ok`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform a single attempt of `call`
    async fn unary(&self, call: UnaryCall) -> Result<UnaryResponse, Status>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn unary(&self, call: UnaryCall) -> Result<UnaryResponse, Status> {
        (**self).unary(call).await
    }
}
