//! Data models for crawled articles and run reporting.
//!
//! This module defines the core data structures used throughout the crawler:
//! - [`Article`]: one parsed article as persisted in the JSON store
//! - [`RunReport`]: end-of-run counts printed as the crawl summary

use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed news article as stored in the JSON data file.
///
/// Records are immutable once written: the store only ever appends. The
/// `url` is the unique key; two records never share one.
///
/// # Fields
///
/// * `url` - The article URL, unique within the store
/// * `title` - Headline text, never empty
/// * `content` - Body paragraphs joined with newlines, optionally led by the
///   article's short description and a blank line
/// * `publish_date` - Publish time as Unix seconds
/// * `crawled_at` - Unix seconds at parse completion; absent on records
///   loaded from older store files
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Article {
    pub url: String,
    pub title: String,
    pub content: String,
    pub publish_date: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crawled_at: Option<i64>,
}

impl Article {
    /// Whether this article's publish time falls inside the trailing
    /// recency window `[now - days, now]`.
    ///
    /// Saturating arithmetic: an oversized window clamps to "any past
    /// timestamp passes" instead of overflowing.
    pub fn is_within_days(&self, days: i64, now: i64) -> bool {
        let floor = now.saturating_sub(days.saturating_mul(86_400));
        self.publish_date >= floor && self.publish_date <= now
    }
}

/// End-of-run statistics, printed to stdout as the crawl summary.
#[derive(Debug)]
pub struct RunReport {
    /// Records already in the store when the run started.
    pub existing: usize,
    /// Records accumulated by this run.
    pub new: usize,
    /// Records in the store after saving.
    pub total: usize,
    /// URLs that failed to fetch or parse this run.
    pub failed_urls: Vec<String>,
    /// Path of the persisted store file.
    pub store_path: String,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n=== Crawl results ===")?;
        writeln!(f, "Existing articles: {}", self.existing)?;
        writeln!(f, "New articles: {}", self.new)?;
        writeln!(f, "Total articles: {}", self.total)?;
        writeln!(f, "Failed URLs: {}", self.failed_urls.len())?;
        if !self.failed_urls.is_empty() {
            writeln!(f, "\nFailed URLs:")?;
            for url in &self.failed_urls {
                writeln!(f, "- {url}")?;
            }
        }
        write!(f, "\nOutput file: {}", self.store_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn sample() -> Article {
        Article {
            url: "https://vnexpress.net/bai-viet-1234.html".to_string(),
            title: "Tiêu đề".to_string(),
            content: "Mô tả.\n\nĐoạn một.\nĐoạn hai.".to_string(),
            publish_date: 1_740_000_000,
            crawled_at: Some(1_740_100_000),
        }
    }

    #[test]
    fn test_article_serde_round_trip() {
        let article = sample();
        let json = serde_json::to_string_pretty(&article).unwrap();
        let back: Article = serde_json::from_str(&json).unwrap();
        assert_eq!(article, back);
    }

    #[test]
    fn test_crawled_at_omitted_when_absent() {
        let mut article = sample();
        article.crawled_at = None;
        let json = serde_json::to_string(&article).unwrap();
        assert!(!json.contains("crawled_at"));

        // Older store files never had the field; they still deserialize.
        let back: Article = serde_json::from_str(&json).unwrap();
        assert_eq!(back.crawled_at, None);
    }

    #[test]
    fn test_non_ascii_preserved_in_json() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("Tiêu đề"));
        assert!(json.contains("Đoạn một."));
    }

    #[test]
    fn test_recency_window_accepts_three_day_old() {
        let now = Local::now().timestamp();
        let mut article = sample();
        article.publish_date = now - 3 * 86_400;
        assert!(article.is_within_days(7, now));
    }

    #[test]
    fn test_recency_window_rejects_ten_day_old() {
        let now = Local::now().timestamp();
        let mut article = sample();
        article.publish_date = now - 10 * 86_400;
        assert!(!article.is_within_days(7, now));
    }

    #[test]
    fn test_recency_window_survives_extreme_day_counts() {
        let now = Local::now().timestamp();
        let article = sample();
        assert!(article.is_within_days(i64::MAX, now));
        assert!(!article.is_within_days(i64::MIN, now));
    }

    #[test]
    fn test_recency_window_rejects_future_timestamp() {
        let now = Local::now().timestamp();
        let mut article = sample();
        article.publish_date = now + 3_600;
        assert!(!article.is_within_days(7, now));
    }

    #[test]
    fn test_run_report_display() {
        let report = RunReport {
            existing: 5,
            new: 2,
            total: 7,
            failed_urls: vec!["https://vnexpress.net/hong.html".to_string()],
            store_path: "data/vnexpress_articles.json".to_string(),
        };
        let text = report.to_string();
        assert!(text.contains("=== Crawl results ==="));
        assert!(text.contains("Existing articles: 5"));
        assert!(text.contains("New articles: 2"));
        assert!(text.contains("Total articles: 7"));
        assert!(text.contains("- https://vnexpress.net/hong.html"));
        assert!(text.contains("Output file: data/vnexpress_articles.json"));
    }
}
