//! # VnExpress Crawler
//!
//! A single-site news crawler that walks configured VnExpress category
//! pages, fetches each unseen article, extracts its title, body, and
//! publish time, keeps only articles inside the recency window, and appends
//! them to a local JSON store.
//!
//! ## Usage
//!
//! ```sh
//! vnexpress_crawler --days 7 -l https://vnexpress.net/oto-xe-may
//! ```
//!
//! ## Architecture
//!
//! The application is a sequential pipeline:
//! 1. **Listing**: fetch each category page and extract article links
//! 2. **Fetching**: download each unseen article, with jitter between requests
//! 3. **Parsing**: extract structured fields and normalize the publish date
//! 4. **Filtering**: discard articles older than the recency window
//! 5. **Persisting**: append new records to the JSON store at end of run

use clap::Parser;
use std::error::Error;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod fetch;
mod models;
mod pipeline;
mod scrapers;
mod store;
mod utils;

use cli::Cli;
use config::CrawlConfig;
use pipeline::Crawler;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("vnexpress_crawler starting up");

    // Parse CLI and layer overrides onto the config file.
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let mut config = CrawlConfig::load(&args.config)?;
    if let Some(data_file) = args.data_file {
        config.data_file = data_file;
    }
    if let Some(days) = args.days {
        config.window_days = days;
    }
    if !args.listing.is_empty() {
        config.listing_urls = args.listing;
    }
    config.validate()?;
    debug!(?config, "Effective configuration");

    // ---- Crawl ----
    let mut crawler = Crawler::new(config)?;
    let report = crawler.run().await;

    println!("{report}");

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        new = report.new,
        failed = report.failed_urls.len(),
        "Execution complete"
    );

    Ok(())
}
