//! Retry and pacing policy.

use std::time::Duration;

/// Configuration for the fetch retry loop.
///
/// The provider throttles aggressively, so every attempt is paced: before
/// attempt `n` (starting at 0) the client waits `initial_delay * 2^n`,
/// capped at `max_delay`. With the defaults that is 1 s, 2 s and 4 s.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use trends_lib::rate_limit::RetryConfig;
///
/// let config = RetryConfig::default();
/// assert_eq!(config.delay_before(0), Duration::from_secs(1));
/// assert_eq!(config.delay_before(2), Duration::from_secs(4));
///
/// // Only wait between attempts
/// let between = RetryConfig::default().sleep_before_first(false);
/// assert_eq!(between.delay_before(0), Duration::ZERO);
///
/// // Single attempt, no waiting
/// let once = RetryConfig::no_retry();
/// assert_eq!(once.max_attempts, 1);
/// ```
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total number of attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the first attempt (doubles each attempt).
    pub initial_delay: Duration,
    /// Upper bound of a single delay.
    pub max_delay: Duration,
    /// Whether the first attempt is paced too.
    pub sleep_before_first: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            sleep_before_first: true,
        }
    }
}

impl RetryConfig {
    /// Creates a config with a single, unpaced attempt.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            initial_delay: Duration::ZERO,
            sleep_before_first: false,
            ..Default::default()
        }
    }

    /// Sets the total number of attempts (at least one is always made).
    pub fn max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n.max(1);
        self
    }

    /// Sets the delay before the first attempt.
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the maximum single delay.
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Enables or disables pacing of the first attempt.
    pub fn sleep_before_first(mut self, enabled: bool) -> Self {
        self.sleep_before_first = enabled;
        self
    }

    /// Returns how long to wait before `attempt` (0-based).
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt == 0 && !self.sleep_before_first {
            return Duration::ZERO;
        }
        let factor = 2u32.saturating_pow(attempt);
        self.initial_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule() {
        let config = RetryConfig::default();
        let delays: Vec<_> = (0..config.max_attempts)
            .map(|a| config.delay_before(a))
            .collect();
        assert_eq!(
            delays,
            [1, 2, 4].map(Duration::from_secs).to_vec()
        );
    }

    #[test]
    fn test_delay_is_capped() {
        let config = RetryConfig::default().max_delay(Duration::from_secs(3));
        assert_eq!(config.delay_before(2), Duration::from_secs(3));
        assert_eq!(config.delay_before(40), Duration::from_secs(3));
    }

    #[test]
    fn test_between_attempts_only() {
        let config = RetryConfig::default().sleep_before_first(false);
        assert_eq!(config.delay_before(0), Duration::ZERO);
        assert_eq!(config.delay_before(1), Duration::from_secs(2));
        assert!(config.delay_before(2) > config.delay_before(1));
    }

    #[test]
    fn test_at_least_one_attempt() {
        assert_eq!(RetryConfig::default().max_attempts(0).max_attempts, 1);
    }
}
