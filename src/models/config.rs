//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where collected documents are read from
    #[serde(default)]
    pub store: StoreConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Collection job health thresholds
    #[serde(default)]
    pub freshness: FreshnessConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.store.base_url.is_none() && self.store.root.trim().is_empty() {
            return Err(AppError::validation(
                "store.root is empty and no store.base_url is set",
            ));
        }
        if let Some(base) = &self.store.base_url {
            url::Url::parse(base)?;
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.http.max_concurrent == 0 {
            return Err(AppError::validation("http.max_concurrent must be > 0"));
        }
        if self.freshness.stale_after_minutes <= self.freshness.expected_interval_minutes {
            return Err(AppError::validation(
                "freshness.stale_after_minutes must exceed freshness.expected_interval_minutes",
            ));
        }
        Ok(())
    }
}

/// Document store location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Local data directory holding `index.json`, `raw/` and `derived/`
    #[serde(default = "defaults::root")]
    pub root: String,

    /// Published site serving the same layout; wins over `root` when set
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: defaults::root(),
            base_url: None,
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum concurrent document fetches
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Collection job health thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreshnessConfig {
    /// Minutes since the last run after which the job is considered stalled
    #[serde(default = "defaults::stale_after")]
    pub stale_after_minutes: i64,

    /// How often the job is scheduled to run
    #[serde(default = "defaults::expected_interval")]
    pub expected_interval_minutes: i64,
}

impl Default for FreshnessConfig {
    fn default() -> Self {
        Self {
            stale_after_minutes: defaults::stale_after(),
            expected_interval_minutes: defaults::expected_interval(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "defaults::level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::level(),
        }
    }
}

mod defaults {
    pub fn root() -> String {
        "data".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; toptrend/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_concurrent() -> usize {
        5
    }
    pub fn stale_after() -> i64 {
        50
    }
    pub fn expected_interval() -> i64 {
        20
    }
    pub fn level() -> String {
        "info".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.http.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_concurrency() {
        let mut config = Config::default();
        config.http.max_concurrent = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let mut config = Config::default();
        config.store.base_url = Some("not a url".to_string());
        assert!(matches!(config.validate(), Err(AppError::Url(_))));
    }

    #[test]
    fn validate_rejects_threshold_below_interval() {
        let mut config = Config::default();
        config.freshness.stale_after_minutes = 15;
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [store]
            base_url = "https://example.github.io/toptrend/data/"

            [freshness]
            stale_after_minutes = 90
            "#,
        )
        .unwrap();

        assert_eq!(config.store.root, "data");
        assert_eq!(config.http.max_concurrent, 5);
        assert_eq!(config.freshness.stale_after_minutes, 90);
        assert_eq!(config.freshness.expected_interval_minutes, 20);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn load_or_default_on_missing_file() {
        let config = Config::load_or_default("/nonexistent/toptrend.toml");
        assert_eq!(config.freshness.stale_after_minutes, 50);
    }
}
