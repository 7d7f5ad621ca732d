//! Failure taxonomy for the crawl pipeline.
//!
//! Every component boundary (fetch, parse, store) returns a [`CrawlError`]
//! rather than panicking or bubbling opaque boxed errors. Callers branch on
//! the variant: network and parse failures mark a URL as failed and the run
//! continues; store failures degrade to an empty load or a skipped save.

use thiserror::Error;

pub type Result<T> = core::result::Result<T, CrawlError>;

#[derive(Debug, Error)]
pub enum CrawlError {
    /// Transport-level failure: timeout, connection refused, body read error.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status other than 429.
    #[error("unexpected HTTP status {status} from {url}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// HTTP 429 persisted through every backoff attempt.
    #[error("rate limited fetching {url} after {attempts} attempts")]
    RateLimited { url: String, attempts: usize },

    /// An expected markup node was absent or empty.
    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },

    /// The publish-date string did not match the site's format.
    #[error("unparseable publish date: {raw:?}")]
    DateFormat { raw: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// A configuration value that deserialized fine but cannot be run.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
