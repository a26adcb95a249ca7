use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Feed polling configuration
    #[serde(default)]
    pub feed: FeedConfig,
    /// Address the HTTP server binds to (default: 0.0.0.0:3000)
    #[serde(default = "Config::default_listen_addr")]
    pub listen_addr: String,
    /// Allowed CORS origins. Required unless cors_permissive is true.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Explicitly allow all origins (development only). Defaults to false.
    #[serde(default)]
    pub cors_permissive: bool,
}

/// Configuration for the train position feed poller
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// URL of the JSON snapshot resource
    #[serde(default = "FeedConfig::default_url")]
    pub url: String,
    /// Interval in seconds between refresh cycles (default: 60)
    #[serde(default = "FeedConfig::default_interval_secs")]
    pub interval_secs: u64,
    /// IANA timezone the feed's seconds-since-midnight values refer to
    /// (default: Europe/Budapest)
    #[serde(default = "FeedConfig::default_timezone")]
    pub timezone: String,
    /// Per-request timeout in seconds (default: 30)
    #[serde(default = "FeedConfig::default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: Self::default_url(),
            interval_secs: Self::default_interval_secs(),
            timezone: Self::default_timezone(),
            request_timeout_secs: Self::default_request_timeout_secs(),
        }
    }
}

impl FeedConfig {
    fn default_url() -> String {
        "https://vonatradar.hu/train_data.json".to_string()
    }
    fn default_interval_secs() -> u64 {
        60
    }
    fn default_timezone() -> String {
        "Europe/Budapest".to_string()
    }
    fn default_request_timeout_secs() -> u64 {
        30
    }

    /// Parse the configured timezone, falling back to Europe/Budapest.
    pub fn parsed_timezone(&self) -> chrono_tz::Tz {
        self.timezone.parse().unwrap_or_else(|_| {
            tracing::warn!(
                timezone = %self.timezone,
                "Unknown timezone in config, falling back to Europe/Budapest"
            );
            chrono_tz::Europe::Budapest
        })
    }
}

impl Config {
    fn default_listen_addr() -> String {
        "0.0.0.0:3000".to_string()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse config: {0}")]
    ParseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_defaults_apply() {
        let config: Config = serde_yaml::from_str("cors_permissive: true").unwrap();
        assert_eq!(config.feed.interval_secs, 60);
        assert_eq!(config.feed.request_timeout_secs, 30);
        assert_eq!(config.feed.parsed_timezone(), chrono_tz::Europe::Budapest);
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn explicit_feed_settings_override_defaults() {
        let yaml = r#"
feed:
  url: "http://localhost:8080/train_data.json"
  interval_secs: 30
  timezone: "Europe/Vienna"
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.feed.url, "http://localhost:8080/train_data.json");
        assert_eq!(config.feed.interval_secs, 30);
        assert_eq!(config.feed.parsed_timezone(), chrono_tz::Europe::Vienna);
    }

    #[test]
    fn unknown_timezone_falls_back() {
        let config = FeedConfig {
            timezone: "Not/AZone".to_string(),
            ..FeedConfig::default()
        };
        assert_eq!(config.parsed_timezone(), chrono_tz::Europe::Budapest);
    }
}
