//! Pipeline integration tests
//!
//! Drives the full interceptor chain and retry loop against scripted
//! transports.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::*;
use scs_core::interceptor::{
    AgentInterceptor, AuthInterceptor, ReadConcern, ReadConcernInterceptor, AGENT_HEADER,
    AUTHORIZATION_HEADER, READ_CONCERN_HEADER, RUNTIME_VERSION_HEADER,
};
use scs_core::retry::{Backoff, FixedCountRetryStrategy, StatsObserver};
use scs_core::{
    methods, CallOptions, CancellationToken, ErrorKind, StatusCode, UnaryCall, UnaryPipeline,
};

fn client_pipeline(transport: Arc<MockTransport>) -> UnaryPipeline {
    UnaryPipeline::builder(transport)
        .interceptor(AgentInterceptor::with_values("rust:cache:test", "rust 1.85"))
        .interceptor(AuthInterceptor::new("api-key"))
        .interceptor(ReadConcernInterceptor::new(ReadConcern::Consistent))
        .build()
}

#[tokio::test]
async fn test_retry_then_success() -> anyhow::Result<()> {
    init_tracing();
    let transport = MockTransport::scripted(vec![unavailable(), ok(b"value")]);
    let pipeline = client_pipeline(transport.clone());

    let response = pipeline.invoke(cache_call(methods::SET, "users")).await?;

    assert_eq!(response.payload, b"value".to_vec());
    assert_eq!(transport.invocation_count(), 2);
    assert!(transport
        .invocations()
        .iter()
        .all(|i| i.method == methods::SET));
    Ok(())
}

#[tokio::test]
async fn test_exhausts_after_max_attempts() {
    let transport = MockTransport::always_failing(StatusCode::Internal);
    let observer = Arc::new(StatsObserver::new());
    let pipeline = UnaryPipeline::builder(transport.clone())
        .retry_strategy(FixedCountRetryStrategy::new(3))
        .observer(observer.clone())
        .build();

    let err = pipeline
        .invoke(cache_call(methods::SET, "users"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InternalServer);
    assert_eq!(err.status_code(), Some(StatusCode::Internal));
    assert_eq!(transport.invocation_count(), 3);
    assert_eq!(observer.attempt_starts(), 3);
    assert_eq!(observer.failures(), 2);
    assert_eq!(observer.exhaustions(), 1);
}

#[tokio::test]
async fn test_non_idempotent_method_is_not_retried() {
    let transport = MockTransport::scripted(vec![unavailable(), ok(b"1")]);
    let observer = Arc::new(StatsObserver::new());
    let pipeline = UnaryPipeline::builder(transport.clone())
        .observer(observer.clone())
        .build();

    let err = pipeline
        .invoke(cache_call(methods::INCREMENT, "counters"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ServerUnavailable);
    assert_eq!(transport.invocation_count(), 1);
    assert_eq!(observer.abandonments(), 1);
}

#[tokio::test]
async fn test_non_retryable_status_fails_immediately() {
    let transport = MockTransport::scripted(vec![fail_with_err(
        StatusCode::InvalidArgument,
        "key must not be empty",
        "invalid_key",
    )]);
    let pipeline = client_pipeline(transport.clone());

    let err = pipeline
        .invoke(cache_call(methods::GET, "users"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::BadRequest);
    assert_eq!(err.error_code(), "BAD_REQUEST_ERROR");
    assert!(err.message().ends_with("key must not be empty"));
    assert_eq!(err.service_error_code(), Some("invalid_key"));
    assert_eq!(transport.invocation_count(), 1);
}

#[tokio::test]
async fn test_agent_tag_only_on_first_invocation() {
    let transport = MockTransport::scripted(vec![unavailable(), ok(b""), ok(b""), ok(b"")]);
    let pipeline = client_pipeline(transport.clone());

    for _ in 0..3 {
        pipeline
            .invoke(cache_call(methods::GET, "users"))
            .await
            .unwrap();
    }

    // 1 retried call + 2 more calls
    assert_eq!(transport.invocation_count(), 4);

    let first = transport.metadata_of(0);
    assert_eq!(first.get(AGENT_HEADER), Some("rust:cache:test"));
    assert_eq!(first.get(RUNTIME_VERSION_HEADER), Some("rust 1.85"));

    for index in 1..4 {
        let metadata = transport.metadata_of(index);
        assert!(!metadata.contains_key(AGENT_HEADER), "invocation {}", index);
        assert!(!metadata.contains_key(RUNTIME_VERSION_HEADER));
    }
}

#[tokio::test]
async fn test_agent_tag_is_per_pipeline() {
    let transport = MockTransport::scripted(vec![ok(b""), ok(b"")]);
    let first = client_pipeline(transport.clone());
    let second = client_pipeline(transport.clone());

    first.invoke(cache_call(methods::GET, "a")).await.unwrap();
    second.invoke(cache_call(methods::GET, "b")).await.unwrap();

    assert!(transport.metadata_of(0).contains_key(AGENT_HEADER));
    assert!(transport.metadata_of(1).contains_key(AGENT_HEADER));
}

#[tokio::test]
async fn test_headers_present_on_every_attempt() {
    let transport = MockTransport::scripted(vec![internal(), unavailable(), ok(b"")]);
    let pipeline = client_pipeline(transport.clone());

    pipeline
        .invoke(cache_call(methods::DICTIONARY_GET, "users"))
        .await
        .unwrap();

    assert_eq!(transport.invocation_count(), 3);
    for invocation in transport.invocations() {
        let metadata = &invocation.metadata;
        assert_eq!(metadata.get(AUTHORIZATION_HEADER), Some("api-key"));
        assert_eq!(metadata.get(READ_CONCERN_HEADER), Some("consistent"));
        assert_eq!(metadata.get("cache"), Some("users"));
        assert_eq!(metadata.get_all(AUTHORIZATION_HEADER).len(), 1);
        assert_eq!(invocation.payload, b"payload".to_vec());
    }
}

#[tokio::test]
async fn test_timeout_reaches_transport() {
    let transport = MockTransport::scripted(vec![unavailable(), ok(b"")]);
    let pipeline = client_pipeline(transport.clone());
    let call = cache_call(methods::GET, "users")
        .with_options(CallOptions::default().with_timeout(Duration::from_millis(250)));

    pipeline.invoke(call).await.unwrap();

    assert!(transport
        .invocations()
        .iter()
        .all(|i| i.timeout == Some(Duration::from_millis(250))));
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_during_backoff() {
    let transport = MockTransport::always_failing(StatusCode::Unavailable);
    let observer = Arc::new(StatsObserver::new());
    let pipeline = UnaryPipeline::builder(transport.clone())
        .retry_strategy(
            FixedCountRetryStrategy::new(5).with_backoff(Backoff::fixed(Duration::from_secs(30))),
        )
        .observer(observer.clone())
        .build();

    let token = CancellationToken::new();
    let call = UnaryCall::new(methods::GET, Vec::new())
        .with_options(CallOptions::default().with_cancellation(token.clone()));

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(1)).await;
        token.cancel();
    });

    let start = tokio::time::Instant::now();
    let err = pipeline.invoke(call).await.unwrap_err();
    canceller.await.unwrap();

    assert_eq!(err.kind(), ErrorKind::Cancelled);
    assert_eq!(transport.invocation_count(), 1);
    assert!(start.elapsed() < Duration::from_secs(30));
    assert_eq!(observer.cancellations(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_during_attempt() {
    let transport = Arc::new(HangingTransport::default());
    let pipeline = UnaryPipeline::builder(transport.clone()).build();

    let token = CancellationToken::new();
    let call = UnaryCall::new(methods::GET, Vec::new())
        .with_options(CallOptions::default().with_cancellation(token.clone()));

    let handle = tokio::spawn(async move { pipeline.invoke(call).await });
    tokio::time::sleep(Duration::from_millis(10)).await;
    token.cancel();

    let err = handle.await.unwrap().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cancelled);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_concurrent_calls_share_pipeline() {
    let transport = MockTransport::scripted(Vec::new());
    let pipeline = client_pipeline(transport.clone());

    let mut handles = Vec::new();
    for i in 0..8 {
        let pipeline = pipeline.clone();
        handles.push(tokio::spawn(async move {
            pipeline
                .invoke(cache_call(methods::GET, &format!("cache-{}", i)))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let tagged = transport
        .invocations()
        .iter()
        .filter(|i| i.metadata.contains_key(AGENT_HEADER))
        .count();
    assert_eq!(transport.invocation_count(), 8);
    assert_eq!(tagged, 1);
}

#[tokio::test(start_paused = true)]
async fn test_backoff_sleep_does_not_block_other_calls() {
    // first call fails then parks in a 60s backoff; every later call succeeds
    let transport = MockTransport::scripted(vec![unavailable()]);
    let pipeline = UnaryPipeline::builder(transport.clone())
        .retry_strategy(
            FixedCountRetryStrategy::default().with_backoff(Backoff::fixed(Duration::from_secs(60))),
        )
        .build();

    let sleeper = {
        let pipeline = pipeline.clone();
        tokio::spawn(async move { pipeline.invoke(cache_call(methods::GET, "slow")).await })
    };

    // let the first call reach its backoff sleep
    while transport.invocation_count() < 1 {
        tokio::task::yield_now().await;
    }

    let start = tokio::time::Instant::now();
    pipeline
        .invoke(cache_call(methods::GET, "fast"))
        .await
        .unwrap();

    assert_eq!(start.elapsed(), Duration::ZERO);
    assert!(!sleeper.is_finished());
    assert_eq!(transport.invocation_count(), 2);

    let response = sleeper.await.unwrap();
    assert!(response.is_ok());
    assert_eq!(transport.invocation_count(), 3);
    assert!(start.elapsed() >= Duration::from_secs(60));
}
