//! Mock transports for testing
//!
//! Provides transports that replay scripted outcomes and record what they
//! were asked to send, so tests can assert on invocation counts and headers
//! without a network.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use scs_core::{Metadata, Status, StatusCode, Transport, UnaryCall, UnaryResponse};

use super::builders::Outcome;

/// Record of a transport invocation
#[derive(Clone, Debug)]
pub struct MockInvocation {
    pub method: String,
    pub metadata: Metadata,
    pub timeout: Option<Duration>,
    pub payload: Vec<u8>,
}

/// Transport replaying a script of outcomes
///
/// Once the script runs out, `default_outcome` is returned for every call.
pub struct MockTransport {
    script: Arc<Mutex<VecDeque<Outcome>>>,
    invocations: Arc<Mutex<Vec<MockInvocation>>>,
    default_outcome: Outcome,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            invocations: Arc::new(Mutex::new(Vec::new())),
            default_outcome: Ok(UnaryResponse::default()),
        }
    }

    /// Transport returning `outcomes` in order
    pub fn scripted(outcomes: Vec<Outcome>) -> Arc<Self> {
        let transport = Self::new();
        transport.script.lock().unwrap().extend(outcomes);
        Arc::new(transport)
    }

    /// Transport failing every call with `code`
    pub fn always_failing(code: StatusCode) -> Arc<Self> {
        let mut transport = Self::new();
        transport.default_outcome = Err(Status::new(code, "scripted failure"));
        Arc::new(transport)
    }

    /// Queue another outcome
    pub fn push(&self, outcome: Outcome) {
        self.script.lock().unwrap().push_back(outcome);
    }

    /// Get all recorded invocations
    pub fn invocations(&self) -> Vec<MockInvocation> {
        self.invocations.lock().unwrap().clone()
    }

    pub fn invocation_count(&self) -> usize {
        self.invocations.lock().unwrap().len()
    }

    /// Metadata sent with invocation `index`
    pub fn metadata_of(&self, index: usize) -> Metadata {
        self.invocations.lock().unwrap()[index].metadata.clone()
    }

    pub fn clear_invocations(&self) {
        self.invocations.lock().unwrap().clear();
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn unary(&self, call: UnaryCall) -> Result<UnaryResponse, Status> {
        self.invocations.lock().unwrap().push(MockInvocation {
            method: call.method.as_str().to_string(),
            metadata: call.metadata.clone(),
            timeout: call.options.timeout,
            payload: call.payload.clone(),
        });

        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| self.default_outcome.clone())
    }
}

/// Transport that never answers; counts how many attempts reached it
#[derive(Default)]
pub struct HangingTransport {
    calls: Mutex<usize>,
}

impl HangingTransport {
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl Transport for HangingTransport {
    async fn unary(&self, _call: UnaryCall) -> Result<UnaryResponse, Status> {
        *self.calls.lock().unwrap() += 1;
        std::future::pending().await
    }
}
