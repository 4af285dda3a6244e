//! CLI configuration file.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;
use trends_lib::cache::CacheConfig;
use trends_lib::provider::ProviderConfig;
use trends_lib::rate_limit::RetryConfig;

use crate::paths;

/// Local config file, looked up before the user config directory.
const LOCAL_CONFIG: &str = "trends.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Terminal log level (`error`, `warn`, `info`, `debug`, `trace`, `off`).
    pub log_level: String,

    pub provider: ProviderSection,

    pub cache: CacheSection,

    pub retry: RetrySection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSection {
    pub base_url: String,

    /// Interface language sent to the provider.
    pub hl: String,

    /// Timezone offset in minutes.
    pub tz: i32,

    pub timeout_secs: u64,

    pub user_agent: String,

    /// Provider requests allowed in flight at once.
    pub max_concurrent_requests: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSection {
    /// How long results stay cached; 0 disables the cache.
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySection {
    pub max_attempts: u32,

    /// Delay before the first attempt, doubled for each following one.
    pub initial_delay_ms: u64,

    /// When false, only wait between attempts.
    pub sleep_before_first: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            provider: ProviderSection::default(),
            cache: CacheSection::default(),
            retry: RetrySection::default(),
        }
    }
}

impl Default for ProviderSection {
    fn default() -> Self {
        let defaults = ProviderConfig::default();
        Self {
            base_url: defaults.base_url,
            hl: defaults.hl,
            tz: defaults.tz,
            timeout_secs: defaults.timeout.map_or(0, |t| t.as_secs()),
            user_agent: defaults.user_agent,
            max_concurrent_requests: 1,
        }
    }
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            ttl_secs: CacheConfig::default().ttl.as_secs(),
        }
    }
}

impl Default for RetrySection {
    fn default() -> Self {
        let defaults = RetryConfig::default();
        Self {
            max_attempts: defaults.max_attempts,
            initial_delay_ms: defaults.initial_delay.as_millis() as u64,
            sleep_before_first: defaults.sleep_before_first,
        }
    }
}

impl Config {
    /// Loads the first config file found, or the defaults.
    ///
    /// Returns the path that was read, if any.
    pub fn load() -> Result<(Self, Option<PathBuf>)> {
        for path in Self::config_paths() {
            if path.exists() {
                let config = Self::load_from_path(&path)?;
                return Ok((config, Some(path)));
            }
        }
        Ok((Self::default(), None))
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        std::fs::write(path, self.to_toml()?)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Where `config init` writes.
    pub fn default_config_path() -> PathBuf {
        paths::config_file().unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG))
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];

        if let Some(path) = paths::config_file() {
            paths.push(path);
        }

        paths
    }

    pub fn provider_config(&self) -> ProviderConfig {
        let mut config = ProviderConfig::default()
            .with_base_url(&self.provider.base_url)
            .with_hl(&self.provider.hl)
            .with_tz(self.provider.tz)
            .with_user_agent(&self.provider.user_agent);
        config.timeout = match self.provider.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };
        config
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::default().with_ttl(Duration::from_secs(self.cache.ttl_secs))
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::default()
            .max_attempts(self.retry.max_attempts)
            .initial_delay(Duration::from_millis(self.retry.initial_delay_ms))
            .sleep_before_first(self.retry.sleep_before_first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_library() {
        let config = Config::default();
        assert_eq!(config.cache_config().ttl, Duration::from_secs(3600));

        let retry = config.retry_config();
        assert_eq!(retry.max_attempts, 3);
        assert_eq!(retry.delay_before(0), Duration::from_secs(1));

        let provider = config.provider_config();
        assert_eq!(provider.hl, "fr-FR");
        assert_eq!(provider.tz, 360);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            log_level = "debug"

            [cache]
            ttl_secs = 0

            [retry]
            sleep_before_first = false
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert!(!config.cache_config().is_enabled());
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry_config().delay_before(0), Duration::ZERO);
        assert_eq!(config.provider.base_url, "https://trends.google.com");
    }

    #[test]
    fn test_zero_timeout_disables_it() {
        let mut config = Config::default();
        config.provider.timeout_secs = 0;
        assert!(config.provider_config().timeout.is_none());
    }

    #[test]
    fn test_provider_overrides() {
        let config: Config = toml::from_str(
            r#"
            [provider]
            user_agent = "Mozilla/5.0"
            max_concurrent_requests = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.provider_config().user_agent, "Mozilla/5.0");
        assert_eq!(config.provider.max_concurrent_requests, 2);
        assert_eq!(Config::default().provider.max_concurrent_requests, 1);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.provider.hl = "en-US".to_string();
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.provider.hl, "en-US");
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "cache = 3").unwrap();

        let err = Config::load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }
}
