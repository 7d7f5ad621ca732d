//! Runtime configuration loaded from a YAML file.
//!
//! Every field carries a default matching the hard-coded values the crawler
//! shipped with, so a missing config file (or a file that only overrides one
//! field) yields a fully usable [`CrawlConfig`].

use crate::error::{CrawlError, Result};
use rand::{Rng, rng};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Inclusive bounds, in milliseconds, for a randomized pacing delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct DelayWindow {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DelayWindow {
    /// Draw a uniformly random duration inside the window.
    ///
    /// Requires `min_ms <= max_ms`; [`CrawlConfig::validate`] rejects
    /// inverted windows before a run starts.
    pub fn sample(&self) -> Duration {
        Duration::from_millis(rng().random_range(self.min_ms..=self.max_ms))
    }

    fn check(&self, name: &str) -> Result<()> {
        if self.min_ms > self.max_ms {
            return Err(CrawlError::InvalidConfig(format!(
                "{name}: min_ms {} exceeds max_ms {}",
                self.min_ms, self.max_ms
            )));
        }
        Ok(())
    }
}

/// Crawler configuration, deserialized from YAML.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CrawlConfig {
    /// Category/listing pages to crawl, in order.
    #[serde(default = "default_listing_urls")]
    pub listing_urls: Vec<String>,

    /// Trailing recency window: articles older than this many days are
    /// discarded as stale.
    #[serde(default = "default_window_days")]
    pub window_days: i64,

    /// Maximum retries after an HTTP 429 before the fetch fails.
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Base backoff after HTTP 429; attempt N waits N times this.
    #[serde(default = "default_retry_base_secs")]
    pub retry_base_secs: u64,

    /// Jitter slept before every HTTP request.
    #[serde(default = "default_page_delay")]
    pub page_delay_ms: DelayWindow,

    /// Jitter slept between article attempts, wider than the page-level
    /// window to pace the overall crawl rate.
    #[serde(default = "default_article_delay")]
    pub article_delay_ms: DelayWindow,

    /// Path of the persisted JSON store.
    #[serde(default = "default_data_file")]
    pub data_file: String,
}

fn default_listing_urls() -> Vec<String> {
    vec!["https://vnexpress.net/oto-xe-may".to_string()]
}

fn default_window_days() -> i64 {
    7
}

fn default_max_retries() -> usize {
    3
}

fn default_retry_base_secs() -> u64 {
    5
}

fn default_page_delay() -> DelayWindow {
    DelayWindow {
        min_ms: 2000,
        max_ms: 5000,
    }
}

fn default_article_delay() -> DelayWindow {
    DelayWindow {
        min_ms: 3000,
        max_ms: 6000,
    }
}

fn default_data_file() -> String {
    "data/vnexpress_articles.json".to_string()
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            listing_urls: default_listing_urls(),
            window_days: default_window_days(),
            max_retries: default_max_retries(),
            retry_base_secs: default_retry_base_secs(),
            page_delay_ms: default_page_delay(),
            article_delay_ms: default_article_delay(),
            data_file: default_data_file(),
        }
    }
}

impl CrawlConfig {
    /// Load configuration from a YAML file.
    ///
    /// A missing file is not an error: the crawler runs on pure defaults.
    /// A present but malformed or unrunnable file is an error, surfaced at
    /// startup.
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            info!(path, "No config file found; using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&raw)?;
        config.validate()?;
        info!(path, "Loaded configuration");
        Ok(config)
    }

    /// Reject values that deserialize fine but would break a run: inverted
    /// delay windows and a recency window outside 1..=36500 days.
    ///
    /// Called on load and again after CLI overrides are applied.
    pub fn validate(&self) -> Result<()> {
        self.page_delay_ms.check("page_delay_ms")?;
        self.article_delay_ms.check("article_delay_ms")?;
        if !(1..=36_500).contains(&self.window_days) {
            return Err(CrawlError::InvalidConfig(format!(
                "window_days must be between 1 and 36500, got {}",
                self.window_days
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CrawlConfig::default();
        assert_eq!(config.listing_urls, vec!["https://vnexpress.net/oto-xe-may"]);
        assert_eq!(config.window_days, 7);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_base_secs, 5);
        assert_eq!(config.page_delay_ms, DelayWindow { min_ms: 2000, max_ms: 5000 });
        assert_eq!(config.article_delay_ms, DelayWindow { min_ms: 3000, max_ms: 6000 });
        assert_eq!(config.data_file, "data/vnexpress_articles.json");
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let config: CrawlConfig = serde_yaml::from_str("window_days: 3\n").unwrap();
        assert_eq!(config.window_days, 3);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.data_file, "data/vnexpress_articles.json");
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r#"
listing_urls:
  - https://vnexpress.net/thoi-su
  - https://vnexpress.net/oto-xe-may
window_days: 14
max_retries: 5
retry_base_secs: 2
page_delay_ms: { min_ms: 100, max_ms: 200 }
article_delay_ms: { min_ms: 300, max_ms: 400 }
data_file: /tmp/articles.json
"#;
        let config: CrawlConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.listing_urls.len(), 2);
        assert_eq!(config.window_days, 14);
        assert_eq!(config.page_delay_ms, DelayWindow { min_ms: 100, max_ms: 200 });
        assert_eq!(config.data_file, "/tmp/articles.json");
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let config = CrawlConfig::load("/nonexistent/crawler.yaml").unwrap();
        assert_eq!(config.window_days, 7);
    }

    #[test]
    fn test_validate_rejects_inverted_delay_window() {
        let config: CrawlConfig =
            serde_yaml::from_str("page_delay_ms: { min_ms: 500, max_ms: 100 }\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, CrawlError::InvalidConfig(_)));
        assert!(err.to_string().contains("page_delay_ms"));
    }

    #[test]
    fn test_validate_rejects_unrunnable_window_days() {
        for days in [0, -7, i64::MAX] {
            let config = CrawlConfig {
                window_days: days,
                ..CrawlConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(CrawlError::InvalidConfig(_))),
                "accepted window_days {days}"
            );
        }
    }

    #[test]
    fn test_validate_accepts_defaults() {
        CrawlConfig::default().validate().unwrap();
    }

    #[test]
    fn test_delay_window_sample_in_bounds() {
        let window = DelayWindow { min_ms: 10, max_ms: 20 };
        for _ in 0..50 {
            let d = window.sample();
            assert!(d >= Duration::from_millis(10));
            assert!(d <= Duration::from_millis(20));
        }
    }

    #[test]
    fn test_delay_window_degenerate_bounds() {
        let window = DelayWindow { min_ms: 5, max_ms: 5 };
        assert_eq!(window.sample(), Duration::from_millis(5));
    }
}
