//! Agent and runtime tagging

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::call::{UnaryCall, UnaryResponse};
use crate::status::Status;

use super::{Interceptor, Next};

pub const AGENT_HEADER: &str = "agent";
pub const RUNTIME_VERSION_HEADER: &str = "runtime-version";

/// Tags the first transport attempt of a client with the SDK agent and
/// runtime version
///
/// The flag is per interceptor instance, and one instance belongs to one
/// client, so each client tags exactly one attempt over its lifetime.
#[derive(Debug)]
pub struct AgentInterceptor {
    agent: String,
    runtime_version: String,
    first_request: AtomicBool,
}

impl AgentInterceptor {
    /// Create an interceptor tagging requests as `rust:<client_type>:<version>`
    pub fn new(client_type: &str) -> Self {
        Self::with_values(
            format!("rust:{}:{}", client_type, env!("CARGO_PKG_VERSION")),
            default_runtime_version(),
        )
    }

    /// Create an interceptor with explicit header values
    pub fn with_values(agent: impl Into<String>, runtime_version: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            runtime_version: runtime_version.into(),
            first_request: AtomicBool::new(true),
        }
    }

    pub fn agent(&self) -> &str {
        &self.agent
    }

    pub fn runtime_version(&self) -> &str {
        &self.runtime_version
    }

    /// Whether the tag has already been sent
    pub fn has_tagged(&self) -> bool {
        !self.first_request.load(Ordering::Acquire)
    }
}

fn default_runtime_version() -> String {
    let version = env!("CARGO_PKG_RUST_VERSION");
    if version.is_empty() {
        "rust".to_string()
    } else {
        format!("rust {}", version)
    }
}

#[async_trait]
impl Interceptor for AgentInterceptor {
    fn name(&self) -> &'static str {
        "agent"
    }

    async fn intercept(&self, mut call: UnaryCall, next: Next<'_>) -> Result<UnaryResponse, Status> {
        if self.first_request.swap(false, Ordering::AcqRel) {
            call.metadata.insert(AGENT_HEADER, self.agent.as_str());
            call.metadata
                .insert(RUNTIME_VERSION_HEADER, self.runtime_version.as_str());
        }
        next.run(call).await
    }
}
