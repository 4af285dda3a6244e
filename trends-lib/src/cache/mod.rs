//! Result cache
//!
//! Fetched tables are stored as bincode bytes under their [`CacheKey`] hex
//! digest and expire after [`CacheConfig::ttl`].
//!
//! [`CacheKey`]: crate::query::CacheKey

mod config;
mod memory;

pub use config::*;
pub use memory::*;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

/// One stored provider result.
#[derive(Debug, Clone)]
pub struct CachedValue {
    /// Bincode encoding of the result; decoded afresh on every hit.
    pub data: Vec<u8>,
    /// Time of the provider fetch.
    pub created_at: DateTime<Utc>,
    /// First instant at which the entry is stale.
    pub expires_at: DateTime<Utc>,
}

impl CachedValue {
    pub fn new(data: Vec<u8>, created_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            data,
            created_at,
            expires_at,
        }
    }

    /// Entry fetched now and fresh for `ttl`.
    pub fn with_ttl(data: Vec<u8>, ttl: std::time::Duration) -> Self {
        let created_at = Utc::now();
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::zero());
        Self::new(data, created_at, created_at + ttl)
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Storage behind [`TrendsClient`](crate::TrendsClient).
///
/// `get` must not return a stale entry, and should drop one it finds.
/// Writes are last-write-wins.
#[async_trait]
pub trait CacheProvider: Send + Sync {
    async fn get(&self, key: &str) -> Option<CachedValue>;

    async fn set(&self, key: &str, value: CachedValue);

    async fn remove(&self, key: &str);

    async fn clear(&self);

    /// Sweeps stale entries, returning how many were dropped.
    async fn gc(&self) -> usize;
}
