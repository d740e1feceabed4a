//! Mock cache service transport
//!
//! Answers each method from a per-method queue of scripted outcomes and
//! records every invocation.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use scs_core::{Metadata, Status, StatusCode, Transport, UnaryCall, UnaryResponse};

/// Record of a transport invocation
#[derive(Clone, Debug)]
pub struct MockInvocation {
    pub method: String,
    pub metadata: Metadata,
    pub timeout: Option<Duration>,
    pub payload: serde_json::Value,
}

#[derive(Default)]
pub struct MockCacheService {
    responses: Arc<Mutex<HashMap<String, VecDeque<Result<UnaryResponse, Status>>>>>,
    invocations: Arc<Mutex<Vec<MockInvocation>>>,
}

impl MockCacheService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a JSON response body for `method`
    pub fn respond(&self, method: &str, body: serde_json::Value) {
        let payload = serde_json::to_vec(&body).expect("serializable body");
        self.enqueue(method, Ok(UnaryResponse::new(payload)));
    }

    /// Queue a failure for `method`
    pub fn fail(&self, method: &str, code: StatusCode, details: &str) {
        self.enqueue(method, Err(Status::new(code, details)));
    }

    fn enqueue(&self, method: &str, outcome: Result<UnaryResponse, Status>) {
        self.responses
            .lock()
            .unwrap()
            .entry(method.to_string())
            .or_default()
            .push_back(outcome);
    }

    pub fn invocations(&self) -> Vec<MockInvocation> {
        self.invocations.lock().unwrap().clone()
    }

    pub fn invocations_of(&self, method: &str) -> Vec<MockInvocation> {
        self.invocations()
            .into_iter()
            .filter(|i| i.method == method)
            .collect()
    }

    pub fn invocation_count(&self) -> usize {
        self.invocations.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockCacheService {
    async fn unary(&self, call: UnaryCall) -> Result<UnaryResponse, Status> {
        self.invocations.lock().unwrap().push(MockInvocation {
            method: call.method.as_str().to_string(),
            metadata: call.metadata.clone(),
            timeout: call.options.timeout,
            payload: serde_json::from_slice(&call.payload).unwrap_or(serde_json::Value::Null),
        });

        self.responses
            .lock()
            .unwrap()
            .get_mut(call.method.as_str())
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                Err(Status::new(
                    StatusCode::Unimplemented,
                    format!("no scripted response for {}", call.method),
                ))
            })
    }
}
