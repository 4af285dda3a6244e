//! In-memory cache implementation using DashMap

use async_trait::async_trait;
use dashmap::DashMap;
use log::debug;

use super::CacheProvider;
use super::CachedValue;

/// An in-memory cache backed by a concurrent hash map.
///
/// This is the only cache the client ships with: results live for the
/// lifetime of the process.
///
/// # Example
///
/// ```
/// use trends_lib::cache::InMemoryCache;
///
/// let cache = InMemoryCache::new();
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCache {
    store: DashMap<String, CachedValue>,
}

impl InMemoryCache {
    /// Creates a new empty in-memory cache.
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }

    /// Returns the number of entries in the cache, including expired ones not
    /// yet evicted.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

#[async_trait]
impl CacheProvider for InMemoryCache {
    async fn get(&self, key: &str) -> Option<CachedValue> {
        {
            let entry = self.store.get(key)?;
            if !entry.value().is_expired() {
                return Some(entry.value().clone());
            }
        }

        // Another task may have stored a fresh value since the read above.
        if self.store.remove_if(key, |_, v| v.is_expired()).is_some() {
            debug!("Evicted expired cache entry {}", key);
        }
        None
    }

    async fn set(&self, key: &str, value: CachedValue) {
        self.store.insert(key.to_string(), value);
    }

    async fn remove(&self, key: &str) {
        self.store.remove(key);
    }

    async fn clear(&self) {
        self.store.clear();
    }

    async fn gc(&self) -> usize {
        let mut removed = 0;
        self.store.retain(|_, value| {
            if value.is_expired() {
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;

    use super::*;

    fn expired(data: &[u8]) -> CachedValue {
        let past = Utc::now() - chrono::Duration::seconds(10);
        CachedValue::new(data.to_vec(), past - chrono::Duration::hours(1), past)
    }

    #[tokio::test]
    async fn test_get_fresh_value() {
        let cache = InMemoryCache::new();
        cache
            .set("k", CachedValue::with_ttl(b"v".to_vec(), Duration::from_secs(60)))
            .await;

        let value = cache.get("k").await.unwrap();
        assert_eq!(value.data, b"v");
        assert!(value.created_at < value.expires_at);
    }

    #[tokio::test]
    async fn test_expired_value_is_evicted_on_lookup() {
        let cache = InMemoryCache::new();
        cache.set("k", expired(b"v")).await;
        assert_eq!(cache.len(), 1);

        assert!(cache.get("k").await.is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_zero_ttl_is_never_returned() {
        let cache = InMemoryCache::new();
        cache
            .set("k", CachedValue::with_ttl(b"v".to_vec(), Duration::ZERO))
            .await;
        assert!(cache.get("k").await.is_none());
    }

    #[tokio::test]
    async fn test_gc_removes_only_expired() {
        let cache = InMemoryCache::new();
        cache.set("old", expired(b"a")).await;
        cache
            .set("new", CachedValue::with_ttl(b"b".to_vec(), Duration::from_secs(60)))
            .await;

        assert_eq!(cache.gc().await, 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("new").await.is_some());
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let cache = InMemoryCache::new();
        let ttl = Duration::from_secs(60);
        cache.set("k", CachedValue::with_ttl(b"first".to_vec(), ttl)).await;
        cache.set("k", CachedValue::with_ttl(b"second".to_vec(), ttl)).await;

        assert_eq!(cache.get("k").await.unwrap().data, b"second");
    }
}
