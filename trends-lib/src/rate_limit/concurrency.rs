//! Serialization of provider calls.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::sync::SemaphorePermit;

/// Limits the number of concurrent provider requests.
///
/// Wraps a `tokio::sync::Semaphore`. The default limit is 1: the trends
/// provider rate limits per client, so requests are sent one at a time.
///
/// # Example
///
/// ```
/// use trends_lib::rate_limit::ConcurrencyLimiter;
///
/// let limiter = ConcurrencyLimiter::new(10);
/// assert_eq!(limiter.limit(), 10);
/// assert_eq!(limiter.available(), 10);
/// ```
#[derive(Clone)]
pub struct ConcurrencyLimiter {
    semaphore: Arc<Semaphore>,
    limit: usize,
}

impl ConcurrencyLimiter {
    /// Creates a new concurrency limiter with the specified limit.
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(limit)),
            limit,
        }
    }

    /// Acquires a permit, waiting if necessary.
    ///
    /// The permit is released when dropped. Returns `None` only if the
    /// semaphore was closed, which this type never does.
    pub async fn acquire(&self) -> Option<SemaphorePermit<'_>> {
        self.semaphore.acquire().await.ok()
    }

    /// Returns the configured limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the number of available permits.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}

impl Default for ConcurrencyLimiter {
    fn default() -> Self {
        Self::new(1)
    }
}
