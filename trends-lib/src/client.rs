//! Main TrendsClient

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::cache::CacheConfig;
use crate::cache::CacheProvider;
use crate::cache::InMemoryCache;
use crate::error::ApiError;
use crate::provider::GoogleTrendsProvider;
use crate::provider::ProviderConfig;
use crate::provider::TrendsProvider;
use crate::query::CacheKey;
use crate::rate_limit::ConcurrencyLimiter;
use crate::rate_limit::RetryConfig;

/// Rate-limited, caching client for the trends provider.
///
/// This client is cheap to clone (uses `Arc` internally); clones share the
/// cache, the in-flight table and the request limiter, so one instance
/// should be shared across the process.
///
/// # Example
///
/// ```ignore
/// use trends_lib::TrendsClient;
/// use trends_lib::provider::ProviderConfig;
/// use trends_lib::query::normalize;
///
/// let client = TrendsClient::google(ProviderConfig::default())?;
/// let query = normalize(&["cat", "dog"], "FR", start, end)?;
/// let table = client.fetch_interest_over_time(&query).await?.into_inner();
/// ```
#[derive(Clone)]
pub struct TrendsClient {
    pub(crate) inner: Arc<TrendsClientInner>,
}

pub(crate) struct TrendsClientInner {
    pub(crate) provider: Arc<dyn TrendsProvider>,
    pub(crate) cache: Option<Arc<dyn CacheProvider>>,
    pub(crate) cache_config: CacheConfig,
    pub(crate) retry: RetryConfig,
    pub(crate) limiter: ConcurrencyLimiter,
    /// One lock per key being fetched, so identical queries share one fetch.
    pub(crate) in_flight: DashMap<CacheKey, Arc<Mutex<()>>>,
}

impl TrendsClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> TrendsClientBuilder<Missing> {
        TrendsClientBuilder::new()
    }

    /// Creates a client for Google Trends with default cache and retry policy.
    pub fn google(config: ProviderConfig) -> Result<Self, ApiError> {
        let provider = GoogleTrendsProvider::new(config)?;
        Ok(Self::builder().provider(provider).build())
    }

    /// Returns the retry policy.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.inner.retry
    }

    /// Returns the cache settings.
    pub fn cache_config(&self) -> &CacheConfig {
        &self.inner.cache_config
    }

    /// Drops every cached result.
    pub async fn clear_cache(&self) {
        if let Some(cache) = &self.inner.cache {
            cache.clear().await;
        }
    }

    /// Removes expired results, returning how many were dropped.
    pub async fn gc_cache(&self) -> usize {
        match &self.inner.cache {
            Some(cache) => cache.gc().await,
            None => 0,
        }
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`TrendsClient`].
///
/// Uses the typestate pattern to ensure the provider is set at compile time.
///
/// # Example
///
/// ```ignore
/// let client = TrendsClient::builder()
///     .provider(GoogleTrendsProvider::new(ProviderConfig::default())?)
///     .retry(RetryConfig::default().max_attempts(5))
///     .cache_config(CacheConfig::default().with_ttl(Duration::from_secs(600)))
///     .build();
/// ```
pub struct TrendsClientBuilder<Provider> {
    provider: Provider,
    cache: Option<Arc<dyn CacheProvider>>,
    cache_config: CacheConfig,
    retry: RetryConfig,
    limiter: ConcurrencyLimiter,
}

impl TrendsClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            provider: Missing,
            cache: Some(Arc::new(InMemoryCache::new())),
            cache_config: CacheConfig::default(),
            retry: RetryConfig::default(),
            limiter: ConcurrencyLimiter::default(),
        }
    }

    /// Sets the trends provider.
    pub fn provider<T: TrendsProvider + 'static>(
        self,
        provider: T,
    ) -> TrendsClientBuilder<Set<Arc<dyn TrendsProvider>>> {
        self.shared_provider(Arc::new(provider))
    }

    /// Sets a provider that is shared with other owners.
    pub fn shared_provider(
        self,
        provider: Arc<dyn TrendsProvider>,
    ) -> TrendsClientBuilder<Set<Arc<dyn TrendsProvider>>> {
        TrendsClientBuilder {
            provider: Set(provider),
            cache: self.cache,
            cache_config: self.cache_config,
            retry: self.retry,
            limiter: self.limiter,
        }
    }
}

impl Default for TrendsClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> TrendsClientBuilder<P> {
    /// Sets the cache implementation.
    ///
    /// Defaults to an [`InMemoryCache`].
    pub fn cache(mut self, cache: impl CacheProvider + 'static) -> Self {
        self.cache = Some(Arc::new(cache));
        self
    }

    /// Disables caching entirely.
    pub fn no_cache(mut self) -> Self {
        self.cache = None;
        self
    }

    /// Sets the cache TTL settings.
    pub fn cache_config(mut self, config: CacheConfig) -> Self {
        self.cache_config = config;
        self
    }

    /// Sets the retry policy.
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry = config;
        self
    }

    /// Sets how many provider requests may run at once.
    ///
    /// Defaults to 1.
    pub fn max_concurrent_requests(mut self, limit: usize) -> Self {
        self.limiter = ConcurrencyLimiter::new(limit);
        self
    }
}

impl TrendsClientBuilder<Set<Arc<dyn TrendsProvider>>> {
    /// Builds the [`TrendsClient`].
    ///
    /// This method is only available once a provider has been set.
    pub fn build(self) -> TrendsClient {
        let cache = if self.cache_config.is_enabled() {
            self.cache
        } else {
            None
        };

        TrendsClient {
            inner: Arc::new(TrendsClientInner {
                provider: self.provider.0,
                cache,
                cache_config: self.cache_config,
                retry: self.retry,
                limiter: self.limiter,
                in_flight: DashMap::new(),
            }),
        }
    }
}
