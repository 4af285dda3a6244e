//! Cached, paced and retried provider calls
//!
//! Every operation goes through [`TrendsClient::fetch_cached`]:
//!
//! ```text
//! CacheCheck ── hit ──────────────────────────────> Done
//!     │ miss
//!     v
//! wait for in-flight fetch of the same key ── now cached ──> Done
//!     │
//!     v
//! Attempt(n): sleep, call provider ── non-empty ──> Store ──> Done
//!     │ failed, n + 1 < max
//!     └──> Attempt(n + 1)
//!     │ failed, last attempt
//!     v
//! Classify ──> Failed
//! ```

use std::future::Future;
use std::sync::Arc;

use dashmap::DashMap;
use log::debug;
use log::error;
use log::warn;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::TrendsClient;
use crate::cache::CachedValue;
use crate::error::ApiError;
use crate::error::FetchError;
use crate::model::RelatedQueries;
use crate::model::TrendsResult;
use crate::provider::TrendsRequest;
use crate::query::CacheKey;
use crate::response::Response;

/// A provider result that can be cached.
pub(crate) trait Payload: Serialize + DeserializeOwned {
    /// `false` when the provider answered with nothing to show.
    fn has_data(&self) -> bool;
}

impl Payload for TrendsResult {
    fn has_data(&self) -> bool {
        !self.is_empty()
    }
}

impl Payload for RelatedQueries {
    fn has_data(&self) -> bool {
        !self.is_empty()
    }
}

impl TrendsClient {
    /// Returns the cached value for `key`, or fetches it through `call`.
    pub(crate) async fn fetch_cached<T, F, Fut>(
        &self,
        key: &CacheKey,
        request: &TrendsRequest,
        cancel: &CancellationToken,
        call: F,
    ) -> Result<Response<T>, FetchError>
    where
        T: Payload,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        if let Some(hit) = self.cache_get(key).await {
            debug!("Cache hit for {}", request);
            return Ok(hit);
        }

        let in_flight = InFlight::enter(&self.inner.in_flight, key);
        let _guard = tokio::select! {
            _ = cancel.cancelled() => return Err(FetchError::Cancelled),
            guard = in_flight.lock.lock() => guard,
        };

        // A concurrent fetch of the same key may have finished while we waited.
        if let Some(hit) = self.cache_get(key).await {
            debug!("Cache hit for {} after waiting for an in-flight fetch", request);
            return Ok(hit);
        }

        debug!("Cache miss for {}", request);
        let data = self.fetch_with_retry(request, cancel, call).await?;
        Ok(self.cache_set(key, data).await)
    }

    async fn fetch_with_retry<T, F, Fut>(
        &self,
        request: &TrendsRequest,
        cancel: &CancellationToken,
        call: F,
    ) -> Result<T, FetchError>
    where
        T: Payload,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let retry = &self.inner.retry;
        let mut rate_limited = false;
        let mut all_empty = true;
        let mut last_error = None;

        for attempt in 0..retry.max_attempts {
            let number = attempt + 1;
            let delay = retry.delay_before(attempt);
            if !delay.is_zero() {
                debug!(
                    "Waiting {:?} before attempt {}/{} for {}",
                    delay, number, retry.max_attempts, request
                );
                tokio::select! {
                    _ = cancel.cancelled() => return Err(FetchError::Cancelled),
                    _ = tokio::time::sleep(delay) => {}
                }
            }

            let outcome = {
                let _permit = tokio::select! {
                    _ = cancel.cancelled() => return Err(FetchError::Cancelled),
                    permit = self.inner.limiter.acquire() => permit,
                };
                tokio::select! {
                    _ = cancel.cancelled() => return Err(FetchError::Cancelled),
                    outcome = call() => outcome,
                }
            };

            match outcome {
                Ok(data) if data.has_data() => {
                    debug!("Attempt {}/{} succeeded for {}", number, retry.max_attempts, request);
                    return Ok(data);
                }
                Ok(_) => {
                    warn!(
                        "Attempt {}/{} returned no data for {}",
                        number, retry.max_attempts, request
                    );
                    last_error = Some(ApiError::NoData);
                }
                Err(err) => {
                    warn!(
                        "Attempt {}/{} failed for {}: {}",
                        number, retry.max_attempts, request, err
                    );
                    rate_limited |= err.is_rate_limited();
                    all_empty = false;
                    last_error = Some(err);
                }
            }
        }

        let err = classify(rate_limited, all_empty, last_error.unwrap_or(ApiError::NoData));
        error!("Giving up on {}: {}", request, err);
        Err(err)
    }

    async fn cache_get<T: Payload>(&self, key: &CacheKey) -> Option<Response<T>> {
        let cache = self.inner.cache.as_ref()?;
        let cached = cache.get(key.as_str()).await?;

        match bincode::deserialize::<T>(&cached.data) {
            Ok(data) => Some(Response::cache_hit(data, cached.created_at, cached.expires_at)),
            Err(err) => {
                warn!("Discarding unreadable cache entry {}: {}", key, err);
                cache.remove(key.as_str()).await;
                None
            }
        }
    }

    async fn cache_set<T: Payload>(&self, key: &CacheKey, data: T) -> Response<T> {
        let Some(cache) = &self.inner.cache else {
            return Response::new(data);
        };

        match bincode::serialize(&data) {
            Ok(bytes) => {
                let value = CachedValue::with_ttl(bytes, self.inner.cache_config.ttl);
                let (cached_at, expires_at) = (value.created_at, value.expires_at);
                cache.set(key.as_str(), value).await;
                Response::cache_miss(data, cached_at, expires_at)
            }
            Err(err) => {
                warn!("Failed to cache result {}: {}", key, err);
                Response::new(data)
            }
        }
    }
}

/// Maps the failures of an exhausted retry loop to the error reported to the
/// caller.
fn classify(rate_limited: bool, all_empty: bool, last_error: ApiError) -> FetchError {
    if rate_limited {
        FetchError::RateLimited
    } else if all_empty {
        FetchError::Empty
    } else {
        FetchError::Exhausted(last_error)
    }
}

/// Registration of a caller in the in-flight table.
///
/// Removes the key's lock from the table once its last user is gone,
/// including when the fetch future is dropped midway.
struct InFlight<'a> {
    table: &'a DashMap<CacheKey, Arc<Mutex<()>>>,
    key: &'a CacheKey,
    lock: Arc<Mutex<()>>,
}

impl<'a> InFlight<'a> {
    fn enter(table: &'a DashMap<CacheKey, Arc<Mutex<()>>>, key: &'a CacheKey) -> Self {
        let lock = table.entry(key.clone()).or_default().clone();
        Self { table, key, lock }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        // Our clone plus the table's entry.
        self.table
            .remove_if(self.key, |_, lock| Arc::strong_count(lock) <= 2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_prefers_rate_limit() {
        let err = classify(true, false, ApiError::http(500, "boom"));
        assert!(err.is_rate_limited());
    }

    #[test]
    fn test_classify_empty() {
        assert!(matches!(classify(false, true, ApiError::NoData), FetchError::Empty));
    }

    #[test]
    fn test_classify_exhausted_keeps_last_cause() {
        let err = classify(false, false, ApiError::http(503, "unavailable"));
        assert_eq!(err.cause().and_then(ApiError::status_code), Some(503));
    }

    #[test]
    fn test_in_flight_entry_removed_by_last_user() {
        let table = DashMap::new();
        let key = CacheKey::for_related("cat", "FR");

        let first = InFlight::enter(&table, &key);
        let second = InFlight::enter(&table, &key);
        assert!(Arc::ptr_eq(&first.lock, &second.lock));

        drop(first);
        assert_eq!(table.len(), 1);
        drop(second);
        assert!(table.is_empty());
    }
}
