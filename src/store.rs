//! JSON article store with URL dedup.
//!
//! The store is a single pretty-printed JSON array of [`Article`] records.
//! Loading it seeds the seen-set with every persisted URL, so dedup is
//! correct before the first fetch. Saving rewrites the whole file through a
//! sibling temp file and a rename, so an aborted save leaves the previous
//! file untouched.
//!
//! Read failures never surface to the caller: a missing or corrupt file
//! just starts the run from an empty store.

use crate::error::Result;
use crate::models::Article;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

pub struct ArticleStore {
    path: PathBuf,
    articles: Vec<Article>,
    seen: HashSet<String>,
}

impl ArticleStore {
    /// Load the store from `path`, seeding the seen-set from every record.
    ///
    /// A missing file, unreadable file, or malformed JSON all yield an
    /// empty store; the latter two log a warning.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();

        let articles: Vec<Article> = if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(raw) => match serde_json::from_str(&raw) {
                    Ok(articles) => articles,
                    Err(e) => {
                        warn!(error = %e, "Store file is not valid JSON; starting empty");
                        Vec::new()
                    }
                },
                Err(e) => {
                    warn!(error = %e, "Failed to read store file; starting empty");
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        let seen = articles.iter().map(|a| a.url.clone()).collect();
        info!(count = articles.len(), "Loaded articles from store");
        Self {
            path,
            articles,
            seen,
        }
    }

    pub fn is_seen(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    pub fn mark_seen(&mut self, url: &str) {
        self.seen.insert(url.to_string());
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Append `new_articles` and atomically rewrite the store file.
    ///
    /// The full record set is serialized as pretty JSON (non-ASCII text
    /// preserved as-is), written to a sibling temp file, and renamed over
    /// the target so a failure mid-write cannot truncate existing data.
    #[instrument(level = "info", skip_all, fields(new = new_articles.len()))]
    pub async fn save(&mut self, new_articles: Vec<Article>) -> Result<()> {
        self.articles.extend(new_articles);
        let json = serde_json::to_string_pretty(&self.articles)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        info!(count = self.articles.len(), path = %self.path.display(), "Saved articles to store");
        Ok(())
    }
}
