//! Request interceptors
//!
//! An [`Interceptor`] sees every transport attempt before it is sent. It may
//! add or overwrite metadata and then hands the call to the rest of the chain
//! through [`Next`]. Interceptors are composed once, at client construction,
//! into an [`InterceptorChain`] that ends at the transport.

mod agent;
mod auth;
mod read_concern;

pub use agent::{AgentInterceptor, AGENT_HEADER, RUNTIME_VERSION_HEADER};
pub use auth::{AuthInterceptor, AUTHORIZATION_HEADER};
pub use read_concern::{ReadConcern, ReadConcernInterceptor, READ_CONCERN_HEADER};

use std::sync::Arc;

use async_trait::async_trait;

use crate::call::{UnaryCall, UnaryResponse};
use crate::status::Status;
use crate::transport::Transport;

/// A cross-cutting transform applied to each transport attempt
#[async_trait]
pub trait Interceptor: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Process `call` and pass it on with `next.run(call)`
    async fn intercept(&self, call: UnaryCall, next: Next<'_>) -> Result<UnaryResponse, Status>;
}

/// The remainder of an interceptor chain
#[derive(Clone, Copy)]
pub struct Next<'a> {
    interceptors: &'a [Arc<dyn Interceptor>],
    transport: &'a dyn Transport,
}

impl<'a> Next<'a> {
    /// Run the remaining interceptors and then the transport
    pub async fn run(self, call: UnaryCall) -> Result<UnaryResponse, Status> {
        match self.interceptors.split_first() {
            Some((head, rest)) => {
                let next = Next {
                    interceptors: rest,
                    transport: self.transport,
                };
                head.intercept(call, next).await
            }
            None => self.transport.unary(call).await,
        }
    }
}

/// Interceptors in order, terminated by a transport
#[derive(Clone)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn Interceptor>>,
    transport: Arc<dyn Transport>,
}

impl InterceptorChain {
    /// Create a chain that sends calls straight to `transport`
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            interceptors: Vec::new(),
            transport,
        }
    }

    /// Append an interceptor; it runs after all previously added ones
    pub fn with(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Append a shared interceptor
    pub fn with_shared(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Names of the interceptors in execution order
    pub fn names(&self) -> Vec<&'static str> {
        self.interceptors.iter().map(|i| i.name()).collect()
    }

    /// Send one attempt of `call` through the chain
    pub async fn dispatch(&self, call: UnaryCall) -> Result<UnaryResponse, Status> {
        let next = Next {
            interceptors: &self.interceptors,
            transport: self.transport.as_ref(),
        };
        next.run(call).await
    }
}

impl std::fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterceptorChain")
            .field("interceptors", &self.names())
            .finish_non_exhaustive()
    }
}
