//! Crawl orchestration: listing → article fetch → parse → filter → store.
//!
//! A [`Crawler`] owns the fetcher, the store, and the configuration for one
//! run. Execution is strictly sequential with jitter sleeps between article
//! attempts; the pacing is deliberate, to stay under the site's
//! anti-scraping defenses, not a performance accident.
//!
//! Failure isolation: a listing that fails to fetch is skipped; an article
//! that fails to fetch or parse is recorded as failed; nothing short of a
//! crash aborts the batch, and every run reaches the final summary.

use crate::config::CrawlConfig;
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::models::{Article, RunReport};
use crate::scrapers::vnexpress;
use crate::store::ArticleStore;
use crate::utils::truncate_for_log;
use chrono::Local;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// One crawl session: configuration, HTTP client, and dedup store.
pub struct Crawler {
    config: CrawlConfig,
    fetcher: Fetcher,
    store: ArticleStore,
}

/// Outcome of one article attempt.
enum ArticleOutcome {
    Fresh(Article),
    Stale,
}

impl Crawler {
    /// Build a session from configuration. Loads the store immediately, so
    /// the seen-set is complete before any fetching begins.
    pub fn new(config: CrawlConfig) -> Result<Self> {
        let fetcher = Fetcher::new(&config)?;
        let store = ArticleStore::load(&config.data_file);
        Ok(Self {
            config,
            fetcher,
            store,
        })
    }

    /// Run the full crawl and return the end-of-run report.
    #[instrument(level = "info", skip_all)]
    pub async fn run(&mut self) -> RunReport {
        let mut new_articles: Vec<Article> = Vec::new();
        let mut failed_urls: Vec<String> = Vec::new();

        for listing_url in &self.config.listing_urls {
            info!(url = %listing_url, "Crawling listing");

            let base = match Url::parse(listing_url) {
                Ok(base) => base,
                Err(e) => {
                    error!(url = %listing_url, error = %e, "Invalid listing URL; skipping");
                    continue;
                }
            };

            let html = match self.fetcher.fetch(listing_url).await {
                Ok(html) => html,
                Err(e) => {
                    error!(url = %listing_url, error = %e, "Listing fetch failed; moving on");
                    continue;
                }
            };

            let links = vnexpress::extract_article_links(&html, &base);
            if links.is_empty() {
                warn!(
                    url = %listing_url,
                    preview = %truncate_for_log(&html, 200),
                    "No article links found in listing"
                );
                continue;
            }
            info!(count = links.len(), "Found articles in listing");

            for url in links {
                if self.store.is_seen(&url) {
                    debug!(%url, "Already crawled; skipping");
                    continue;
                }

                match self.crawl_article(&url).await {
                    Ok(ArticleOutcome::Fresh(article)) => {
                        info!(%url, title = %article.title, "Crawled new article");
                        self.store.mark_seen(&url);
                        new_articles.push(article);
                    }
                    Ok(ArticleOutcome::Stale) => {
                        info!(%url, "Article too old; discarding");
                    }
                    Err(e) => {
                        warn!(%url, error = %e, "Failed to crawl article");
                        failed_urls.push(url.clone());
                    }
                }

                let pause = self.config.article_delay_ms.sample();
                debug!(?pause, "Pausing between articles");
                sleep(pause).await;
            }
        }

        let report = RunReport {
            existing: self.store.len(),
            new: new_articles.len(),
            total: self.store.len() + new_articles.len(),
            failed_urls,
            store_path: self.config.data_file.clone(),
        };

        if !new_articles.is_empty() {
            if let Err(e) = self.store.save(new_articles).await {
                error!(error = %e, "Failed to save store; previous file left intact");
            }
        }

        report
    }

    /// Fetch and parse one article, then apply the recency filter.
    async fn crawl_article(&self, url: &str) -> Result<ArticleOutcome> {
        let html = self.fetcher.fetch(url).await?;
        let article = vnexpress::parse_article(&html, url)?;

        let now = Local::now().timestamp();
        if article.is_within_days(self.config.window_days, now) {
            Ok(ArticleOutcome::Fresh(article))
        } else {
            Ok(ArticleOutcome::Stale)
        }
    }
}
