//! HTTP page fetching with jitter and rate-limit backoff.
//!
//! A single [`Fetcher`] is built per run and shared for every request so the
//! underlying connection pool is reused. Before each request it sleeps a
//! random duration inside the configured page-level jitter window; an HTTP
//! 429 is retried with a linearly growing wait (attempt N waits N times the
//! base delay), while any other failure is returned immediately.
//!
//! A failed fetch is never fatal to the run: the caller marks the URL as
//! failed and moves on.

use crate::config::{CrawlConfig, DelayWindow};
use crate::error::{CrawlError, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

/// Browser-like identity sent with every request.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared HTTP client with jitter and 429 backoff.
pub struct Fetcher {
    client: Client,
    page_delay: DelayWindow,
    max_retries: usize,
    retry_base: Duration,
}

impl Fetcher {
    pub fn new(config: &CrawlConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            page_delay: config.page_delay_ms,
            max_retries: config.max_retries,
            retry_base: Duration::from_secs(config.retry_base_secs),
        })
    }

    /// Fetch a page and return its body text.
    ///
    /// Sleeps inside the page-level jitter window before every attempt.
    /// HTTP 429 retries up to `max_retries` times with linear backoff;
    /// exhausted retries yield [`CrawlError::RateLimited`]. Any other
    /// non-success status or transport error fails immediately.
    #[instrument(level = "info", skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let mut attempt = 0usize;
        loop {
            let jitter = self.page_delay.sample();
            debug!(?jitter, "Sleeping before request");
            sleep(jitter).await;

            let response = self.client.get(url).send().await?;
            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                attempt += 1;
                if attempt > self.max_retries {
                    return Err(CrawlError::RateLimited {
                        url: url.to_string(),
                        attempts: attempt,
                    });
                }
                let wait = self.retry_base * attempt as u32;
                warn!(
                    attempt,
                    max = self.max_retries,
                    wait_secs = wait.as_secs(),
                    "Too many requests; waiting before retry"
                );
                sleep(wait).await;
                continue;
            }

            if !status.is_success() {
                return Err(CrawlError::HttpStatus {
                    url: url.to_string(),
                    status,
                });
            }

            return Ok(response.text().await?);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DelayWindow;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> CrawlConfig {
        CrawlConfig {
            page_delay_ms: DelayWindow { min_ms: 0, max_ms: 1 },
            retry_base_secs: 0,
            ..CrawlConfig::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let fetcher = Fetcher::new(&test_config()).unwrap();
        let body = fetcher.fetch(&format!("{}/page", server.uri())).await.unwrap();
        assert_eq!(body, "<html>ok</html>");
    }

    #[tokio::test]
    async fn test_fetch_retries_through_rate_limiting() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(429))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("finally"))
            .mount(&server)
            .await;

        let fetcher = Fetcher::new(&test_config()).unwrap();
        let body = fetcher.fetch(&format!("{}/page", server.uri())).await.unwrap();
        assert_eq!(body, "finally");
    }

    #[tokio::test]
    async fn test_fetch_fails_when_retries_exhausted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let mut config = test_config();
        config.max_retries = 2;
        let fetcher = Fetcher::new(&config).unwrap();
        let err = fetcher.fetch(&format!("{}/page", server.uri())).await.unwrap_err();
        match err {
            CrawlError::RateLimited { attempts, .. } => assert_eq!(attempts, 3),
            other => panic!("expected RateLimited, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_does_not_retry_other_statuses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = Fetcher::new(&test_config()).unwrap();
        let err = fetcher.fetch(&format!("{}/gone", server.uri())).await.unwrap_err();
        match err {
            CrawlError::HttpStatus { status, .. } => {
                assert_eq!(status, StatusCode::NOT_FOUND)
            }
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }
}
