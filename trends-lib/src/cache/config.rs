//! Cache configuration

use std::time::Duration;

/// Cache TTL settings.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use trends_lib::cache::CacheConfig;
///
/// let config = CacheConfig::default().with_ttl(Duration::from_secs(600));
/// assert_eq!(config.ttl, Duration::from_secs(600));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long a fetched result stays fresh.
    ///
    /// Default: 1 hour
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(3600),
        }
    }
}

impl CacheConfig {
    /// Sets the TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Creates a config with no caching (zero TTL).
    pub fn no_cache() -> Self {
        Self { ttl: Duration::ZERO }
    }

    /// Returns `true` if results are cached at all.
    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }
}
