//! Fetch results tagged with their cache origin

use chrono::DateTime;
use chrono::Utc;

/// Data returned by a `fetch_*` call, with where it came from.
///
/// A second identical query within the TTL is answered from the cache; the
/// CLI uses this to print "(cached result from ...)".
///
/// ```ignore
/// let response = client.fetch_interest_over_time(&query).await?;
/// if let Some(at) = response.cached_at() {
///     eprintln!("fetched at {at}");
/// }
/// let table = response.into_inner();
/// ```
#[derive(Debug, Clone)]
pub struct Response<T> {
    data: T,
    /// Whether the provider was called for this result.
    pub cache: CacheStatus,
}

impl<T> Response<T> {
    /// A result from a client without a cache.
    pub fn new(data: T) -> Self {
        Self {
            data,
            cache: CacheStatus::None,
        }
    }

    /// A result just fetched from the provider and stored.
    pub fn cache_miss(data: T, cached_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        let cache = CacheStatus::Miss {
            cached_at,
            expires_at,
        };
        Self { data, cache }
    }

    /// A result served from a live cache entry.
    pub fn cache_hit(data: T, cached_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        let cache = CacheStatus::Hit {
            cached_at,
            expires_at,
        };
        Self { data, cache }
    }

    /// `true` when no provider call was made.
    pub fn is_cached(&self) -> bool {
        self.cache.is_hit()
    }

    /// Provider fetch time of the stored entry.
    pub fn cached_at(&self) -> Option<DateTime<Utc>> {
        match self.cache {
            CacheStatus::Miss { cached_at, .. } | CacheStatus::Hit { cached_at, .. } => {
                Some(cached_at)
            }
            CacheStatus::None => None,
        }
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn into_inner(self) -> T {
        self.data
    }
}

/// Cache origin of a [`Response`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// The client was built without a cache (or with a zero TTL).
    None,
    /// Fetched from the provider; later identical queries hit this entry.
    Miss {
        cached_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    },
    /// Served from the cache; `cached_at` is the original fetch.
    Hit {
        cached_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    },
}

impl CacheStatus {
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }

    pub fn is_miss(&self) -> bool {
        matches!(self, Self::Miss { .. })
    }
}
