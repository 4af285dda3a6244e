//! Provider configuration

use std::time::Duration;

/// Connection settings of the Google Trends provider.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use trends_lib::provider::ProviderConfig;
///
/// let config = ProviderConfig::default()
///     .with_hl("en-US")
///     .with_timeout(Duration::from_secs(10));
/// assert_eq!(config.tz, 360);
/// ```
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Provider origin.
    ///
    /// Default: `https://trends.google.com`
    pub base_url: String,

    /// Interface language sent as `hl`.
    ///
    /// Default: `fr-FR`
    pub hl: String,

    /// Timezone offset in minutes sent as `tz`.
    ///
    /// Default: 360
    pub tz: i32,

    /// Per-request timeout.
    ///
    /// Default: 30 seconds
    pub timeout: Option<Duration>,

    /// User agent of the HTTP client.
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://trends.google.com".to_string(),
            hl: "fr-FR".to_string(),
            tz: 360,
            timeout: Some(Duration::from_secs(30)),
            user_agent: concat!("trends-lib/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ProviderConfig {
    /// Sets the provider origin.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the interface language.
    pub fn with_hl(mut self, hl: impl Into<String>) -> Self {
        self.hl = hl.into();
        self
    }

    /// Sets the timezone offset in minutes.
    pub fn with_tz(mut self, tz: i32) -> Self {
        self.tz = tz;
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
