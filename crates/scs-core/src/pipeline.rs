//! The unary call pipeline
//!
//! A [`UnaryPipeline`] owns the interceptor chain, the retry strategy and the
//! error converter of a client. One call to [`UnaryPipeline::invoke`] is one
//! logical call:
//!
//! 1. Each attempt starts from the caller's call descriptor and is sent
//!    through the interceptor chain to the transport, so headers added by
//!    interceptors are rebuilt for every attempt.
//! 2. The retry stage sits directly in front of the transport and waits for
//!    the attempt's status.
//! 3. A successful attempt ends the call. A failed attempt is handed to the
//!    [`RetryStrategy`]; the call either waits and tries again, or the status
//!    is converted into an [`SdkError`] and returned.
//!
//! Attempts are strictly sequential. The only suspension points are the
//! attempt itself and the delay between attempts, both of which end early
//! when the call's cancellation token fires.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::call::{UnaryCall, UnaryResponse};
use crate::interceptor::{Interceptor, InterceptorChain};
use crate::retry::{FixedCountRetryStrategy, RetryObserver, RetryStrategy, TracingObserver};
use crate::sdk_error::{ErrorConverter, SdkError};
use crate::status::Status;
use crate::transport::Transport;

/// Builder for [`UnaryPipeline`]
///
/// # Example
///
/// ```rust,no_run
/// use scs_core::interceptor::{AuthInterceptor, ReadConcern, ReadConcernInterceptor};
/// use scs_core::retry::FixedCountRetryStrategy;
/// use scs_core::{Transport, UnaryPipeline};
/// use std::sync::Arc;
///
/// fn build(transport: Arc<dyn Transport>) -> UnaryPipeline {
///     UnaryPipeline::builder(transport)
///         .interceptor(AuthInterceptor::new("api-key"))
///         .interceptor(ReadConcernInterceptor::new(ReadConcern::Consistent))
///         .retry_strategy(FixedCountRetryStrategy::new(5))
///         .build()
/// }
/// ```
pub struct UnaryPipelineBuilder {
    chain: InterceptorChain,
    strategy: Arc<dyn RetryStrategy>,
    observer: Arc<dyn RetryObserver>,
}

impl UnaryPipelineBuilder {
    fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            chain: InterceptorChain::new(transport),
            strategy: Arc::new(FixedCountRetryStrategy::default()),
            observer: Arc::new(TracingObserver::new()),
        }
    }

    /// Append an interceptor; interceptors run in the order they are added
    pub fn interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.chain = self.chain.with(interceptor);
        self
    }

    /// Append a shared interceptor
    pub fn shared_interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.chain = self.chain.with_shared(interceptor);
        self
    }

    /// Set the retry strategy (default: [`FixedCountRetryStrategy::default`])
    pub fn retry_strategy(mut self, strategy: impl RetryStrategy + 'static) -> Self {
        self.strategy = Arc::new(strategy);
        self
    }

    /// Set a shared retry strategy
    pub fn shared_retry_strategy(mut self, strategy: Arc<dyn RetryStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the observer (default: [`TracingObserver`])
    pub fn observer(mut self, observer: impl RetryObserver + 'static) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    /// Set a shared observer
    pub fn shared_observer(mut self, observer: Arc<dyn RetryObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn build(self) -> UnaryPipeline {
        UnaryPipeline {
            chain: self.chain,
            strategy: self.strategy,
            observer: self.observer,
            converter: ErrorConverter::new(),
        }
    }
}

/// Interceptor chain plus retry loop for unary calls
#[derive(Clone)]
pub struct UnaryPipeline {
    chain: InterceptorChain,
    strategy: Arc<dyn RetryStrategy>,
    observer: Arc<dyn RetryObserver>,
    converter: ErrorConverter,
}

impl std::fmt::Debug for UnaryPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnaryPipeline")
            .field("chain", &self.chain)
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}

/// Why an attempt produced no response
enum AttemptFailure {
    Status(Status),
    Cancelled,
}

impl UnaryPipeline {
    pub fn builder(transport: Arc<dyn Transport>) -> UnaryPipelineBuilder {
        UnaryPipelineBuilder::new(transport)
    }

    pub fn retry_strategy(&self) -> &dyn RetryStrategy {
        self.strategy.as_ref()
    }

    /// Execute one logical call
    pub async fn invoke(&self, call: UnaryCall) -> Result<UnaryResponse, SdkError> {
        let method = call.method.as_str();
        let max_attempts = self.strategy.max_attempts().max(1);
        let token = call.options.cancellation.as_ref();
        let start = Instant::now();
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;

            if call.options.is_cancelled() {
                return Err(self.cancelled(method, attempt));
            }

            self.observer.on_attempt_start(method, attempt, max_attempts);

            let status = match self.attempt(call.clone(), token).await {
                Ok(response) => {
                    self.observer.on_success(method, attempt, start.elapsed());
                    return Ok(response);
                }
                Err(AttemptFailure::Cancelled) => return Err(self.cancelled(method, attempt)),
                Err(AttemptFailure::Status(status)) => status,
            };

            let code = status.code();
            match self.strategy.decide(code, method, attempt) {
                Some(delay) if attempt < max_attempts => {
                    self.observer.on_attempt_failed(method, attempt, code, delay);
                    if !wait(delay, token).await {
                        return Err(self.cancelled(method, attempt));
                    }
                }
                Some(_) => {
                    self.observer.on_exhausted(method, attempt, code);
                    return Err(self.converter.convert_status(status));
                }
                None => {
                    self.observer.on_abandoned(method, attempt, code);
                    return Err(self.converter.convert_status(status));
                }
            }
        }
    }

    /// Send one attempt, giving up early if the call is cancelled
    async fn attempt(
        &self,
        call: UnaryCall,
        token: Option<&CancellationToken>,
    ) -> Result<UnaryResponse, AttemptFailure> {
        let outcome = match token {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => return Err(AttemptFailure::Cancelled),
                    outcome = self.chain.dispatch(call) => outcome,
                }
            }
            None => self.chain.dispatch(call).await,
        };
        outcome.map_err(AttemptFailure::Status)
    }

    fn cancelled(&self, method: &str, attempt: u32) -> SdkError {
        self.observer.on_cancelled(method, attempt);
        SdkError::cancelled(format!("{} cancelled by caller", method))
    }
}

/// Sleep for `delay`; returns false if cancelled first
async fn wait(delay: Duration, token: Option<&CancellationToken>) -> bool {
    if delay.is_zero() {
        return true;
    }
    match token {
        Some(token) => {
            tokio::select! {
                biased;
                _ = token.cancelled() => false,
                _ = tokio::time::sleep(delay) => true,
            }
        }
        None => {
            tokio::time::sleep(delay).await;
            true
        }
    }
}
