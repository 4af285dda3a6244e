//! Pacing, retry and request serialization.

mod concurrency;
mod retry;

pub use concurrency::ConcurrencyLimiter;
pub use retry::RetryConfig;
