//! Cache client

use std::sync::Arc;
use std::time::Duration;

use scs_core::interceptor::{AgentInterceptor, AuthInterceptor, ReadConcernInterceptor};
use scs_core::retry::{RetryObserver, RetryStrategy};
use scs_core::{
    CallOptions, CancellationToken, ClientConfig, Metadata, SdkError, Transport, UnaryCall,
    UnaryPipeline,
};

use crate::codec::{Codec, JsonCodec};
use crate::credentials::CredentialProvider;
use crate::messages::*;
use crate::validation::{validate_cache_name, validate_list_name, validate_truncate_size, validate_ttl};

/// Header naming the cache a data-plane call targets
pub const CACHE_HEADER: &str = "cache";

const CLIENT_TYPE: &str = "cache";

/// Builder for [`CacheClient`]
pub struct CacheClientBuilder<C = JsonCodec> {
    config: ClientConfig,
    credentials: Option<CredentialProvider>,
    transport: Option<Arc<dyn Transport>>,
    default_ttl: Duration,
    strategy: Option<Arc<dyn RetryStrategy>>,
    observer: Option<Arc<dyn RetryObserver>>,
    codec: C,
}

impl Default for CacheClientBuilder<JsonCodec> {
    fn default() -> Self {
        Self {
            config: ClientConfig::default(),
            credentials: None,
            transport: None,
            default_ttl: Duration::from_secs(60),
            strategy: None,
            observer: None,
            codec: JsonCodec,
        }
    }
}

impl<C: Codec> CacheClientBuilder<C> {
    /// Client configuration (default: [`ClientConfig::default`])
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn credentials(mut self, credentials: CredentialProvider) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// TTL applied to writes that do not pass one (default: 60s)
    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Replace the retry strategy derived from the configuration
    pub fn retry_strategy(mut self, strategy: impl RetryStrategy + 'static) -> Self {
        self.strategy = Some(Arc::new(strategy));
        self
    }

    /// Observe retry attempts (default: tracing)
    pub fn observer(mut self, observer: impl RetryObserver + 'static) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// Use a different payload codec
    pub fn codec<C2: Codec>(self, codec: C2) -> CacheClientBuilder<C2> {
        CacheClientBuilder {
            config: self.config,
            credentials: self.credentials,
            transport: self.transport,
            default_ttl: self.default_ttl,
            strategy: self.strategy,
            observer: self.observer,
            codec,
        }
    }

    pub fn build(self) -> Result<CacheClient<C>, SdkError> {
        self.config
            .validate()
            .map_err(|e| SdkError::invalid_argument(e.to_string()).with_source(e))?;
        let credentials = self
            .credentials
            .ok_or_else(|| SdkError::invalid_argument("credentials are required"))?;
        let transport = self
            .transport
            .ok_or_else(|| SdkError::invalid_argument("a transport is required"))?;
        validate_ttl(self.default_ttl)?;

        let strategy = match self.strategy {
            Some(strategy) => strategy,
            None => Arc::new(self.config.retry.strategy()),
        };

        let mut builder = UnaryPipeline::builder(transport)
            .interceptor(AgentInterceptor::new(CLIENT_TYPE))
            .interceptor(AuthInterceptor::new(credentials.api_key()))
            .interceptor(ReadConcernInterceptor::new(self.config.read_concern))
            .shared_retry_strategy(strategy);
        if let Some(observer) = self.observer {
            builder = builder.shared_observer(observer);
        }

        tracing::debug!(
            endpoint = credentials.cache_endpoint(),
            read_concern = %self.config.read_concern,
            max_attempts = self.config.retry.max_attempts,
            "cache client created"
        );

        Ok(CacheClient {
            pipeline: builder.build(),
            codec: self.codec,
            default_ttl: self.default_ttl,
            request_timeout: self.config.transport.request_timeout(),
            credentials,
            cancellation: None,
        })
    }
}

/// Client for data-plane cache operations
///
/// Cloning is cheap and clones share the pipeline, including the one-time
/// agent tag.
#[derive(Debug, Clone)]
pub struct CacheClient<C = JsonCodec> {
    pipeline: UnaryPipeline,
    codec: C,
    default_ttl: Duration,
    request_timeout: Duration,
    credentials: CredentialProvider,
    cancellation: Option<CancellationToken>,
}

impl CacheClient<JsonCodec> {
    pub fn builder() -> CacheClientBuilder<JsonCodec> {
        CacheClientBuilder::default()
    }
}

impl<C: Codec> CacheClient<C> {
    pub fn cache_endpoint(&self) -> &str {
        self.credentials.cache_endpoint()
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Handle whose operations are all cancelled by `token`
    ///
    /// The handle shares the pipeline with `self`. Cancelling the token ends
    /// in-flight and future calls made through the handle with a
    /// [`Cancelled`](scs_core::ErrorKind::Cancelled) error.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self
    where
        C: Clone,
    {
        Self {
            cancellation: Some(token),
            ..self.clone()
        }
    }

    fn ttl_ms(&self, ttl: Option<Duration>) -> Result<u64, SdkError> {
        validate_ttl(ttl.unwrap_or(self.default_ttl))
    }

    /// Encode, send through the pipeline and decode
    ///
    /// `cancellation` takes precedence over the handle's own token.
    pub async fn send<R: CacheRequest>(
        &self,
        cache_name: &str,
        request: &R,
        cancellation: Option<CancellationToken>,
    ) -> Result<R::Response, SdkError> {
        validate_cache_name(cache_name)?;
        let payload = self.codec.encode(request)?;

        let mut metadata = Metadata::new();
        metadata.insert(CACHE_HEADER, cache_name);

        let mut options = CallOptions::default().with_timeout(self.request_timeout);
        if let Some(token) = cancellation.or_else(|| self.cancellation.clone()) {
            options = options.with_cancellation(token);
        }

        let call = UnaryCall::new(R::METHOD, payload)
            .with_metadata(metadata)
            .with_options(options);
        let response = self.pipeline.invoke(call).await?;
        Ok(self.codec.decode(&response.payload)?)
    }

    pub async fn get(
        &self,
        cache_name: &str,
        key: impl AsRef<[u8]>,
    ) -> Result<GetResponse, SdkError> {
        let request = GetRequest {
            key: key.as_ref().to_vec(),
        };
        self.send(cache_name, &request, None).await
    }

    pub async fn set(
        &self,
        cache_name: &str,
        key: impl AsRef<[u8]>,
        value: impl AsRef<[u8]>,
        ttl: Option<Duration>,
    ) -> Result<SetResponse, SdkError> {
        let request = SetRequest {
            key: key.as_ref().to_vec(),
            value: value.as_ref().to_vec(),
            ttl_ms: self.ttl_ms(ttl)?,
        };
        self.send(cache_name, &request, None).await
    }

    pub async fn delete(
        &self,
        cache_name: &str,
        key: impl AsRef<[u8]>,
    ) -> Result<DeleteResponse, SdkError> {
        let request = DeleteRequest {
            key: key.as_ref().to_vec(),
        };
        self.send(cache_name, &request, None).await
    }

    /// Add `amount` to the integer stored at `field`; never retried
    pub async fn increment(
        &self,
        cache_name: &str,
        field: impl AsRef<[u8]>,
        amount: i64,
        ttl: Option<Duration>,
    ) -> Result<IncrementResponse, SdkError> {
        let request = IncrementRequest {
            field: field.as_ref().to_vec(),
            amount,
            ttl_ms: self.ttl_ms(ttl)?,
        };
        self.send(cache_name, &request, None).await
    }

    pub async fn set_if_not_exists(
        &self,
        cache_name: &str,
        key: impl AsRef<[u8]>,
        value: impl AsRef<[u8]>,
        ttl: Option<Duration>,
    ) -> Result<SetIfNotExistsResponse, SdkError> {
        let request = SetIfNotExistsRequest {
            key: key.as_ref().to_vec(),
            value: value.as_ref().to_vec(),
            ttl_ms: self.ttl_ms(ttl)?,
        };
        self.send(cache_name, &request, None).await
    }

    pub async fn list_push_front(
        &self,
        cache_name: &str,
        list_name: &str,
        value: impl AsRef<[u8]>,
        truncate_back_to_size: Option<u32>,
        ttl: Option<Duration>,
    ) -> Result<ListPushResponse, SdkError> {
        validate_list_name(list_name)?;
        validate_truncate_size(truncate_back_to_size)?;
        let request = ListPushFrontRequest {
            list_name: list_name.as_bytes().to_vec(),
            value: value.as_ref().to_vec(),
            truncate_back_to_size,
            ttl_ms: self.ttl_ms(ttl)?,
            refresh_ttl: true,
        };
        self.send(cache_name, &request, None).await
    }

    pub async fn list_push_back(
        &self,
        cache_name: &str,
        list_name: &str,
        value: impl AsRef<[u8]>,
        truncate_front_to_size: Option<u32>,
        ttl: Option<Duration>,
    ) -> Result<ListPushResponse, SdkError> {
        validate_list_name(list_name)?;
        validate_truncate_size(truncate_front_to_size)?;
        let request = ListPushBackRequest {
            list_name: list_name.as_bytes().to_vec(),
            value: value.as_ref().to_vec(),
            truncate_front_to_size,
            ttl_ms: self.ttl_ms(ttl)?,
            refresh_ttl: true,
        };
        self.send(cache_name, &request, None).await
    }

    pub async fn list_pop_front(
        &self,
        cache_name: &str,
        list_name: &str,
    ) -> Result<ListPopResponse, SdkError> {
        validate_list_name(list_name)?;
        let request = ListPopFrontRequest {
            list_name: list_name.as_bytes().to_vec(),
        };
        self.send(cache_name, &request, None).await
    }

    pub async fn list_pop_back(
        &self,
        cache_name: &str,
        list_name: &str,
    ) -> Result<ListPopResponse, SdkError> {
        validate_list_name(list_name)?;
        let request = ListPopBackRequest {
            list_name: list_name.as_bytes().to_vec(),
        };
        self.send(cache_name, &request, None).await
    }

    pub async fn list_fetch(
        &self,
        cache_name: &str,
        list_name: &str,
        start_index: Option<i32>,
        end_index: Option<i32>,
    ) -> Result<ListFetchResponse, SdkError> {
        validate_list_name(list_name)?;
        if let (Some(start), Some(end)) = (start_index, end_index) {
            if start >= 0 && end >= 0 && end <= start {
                return Err(SdkError::invalid_argument(
                    "end index must be greater than start index",
                ));
            }
        }
        let request = ListFetchRequest {
            list_name: list_name.as_bytes().to_vec(),
            start_index,
            end_index,
        };
        self.send(cache_name, &request, None).await
    }

    pub async fn list_length(
        &self,
        cache_name: &str,
        list_name: &str,
    ) -> Result<ListLengthResponse, SdkError> {
        validate_list_name(list_name)?;
        let request = ListLengthRequest {
            list_name: list_name.as_bytes().to_vec(),
        };
        self.send(cache_name, &request, None).await
    }
}
