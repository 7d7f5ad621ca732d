//! Command-line interface definitions for the VnExpress crawler.
//!
//! This module defines the CLI arguments and options using the `clap`
//! crate. Flags override the corresponding fields of the YAML config.

use clap::Parser;

/// Command-line arguments for the crawler.
///
/// # Examples
///
/// ```sh
/// # Run with the defaults (or ./crawler.yaml if present)
/// vnexpress_crawler
///
/// # Override the recency window and store path
/// vnexpress_crawler --days 3 -d /tmp/articles.json
///
/// # Crawl specific listings instead of the configured ones
/// vnexpress_crawler -l https://vnexpress.net/thoi-su -l https://vnexpress.net/oto-xe-may
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the YAML config file
    #[arg(short, long, default_value = "crawler.yaml")]
    pub config: String,

    /// Override the JSON store path
    #[arg(short, long)]
    pub data_file: Option<String>,

    /// Override the recency window in days
    #[arg(long)]
    pub days: Option<i64>,

    /// Listing URL to crawl (repeatable; replaces the configured list)
    #[arg(short, long)]
    pub listing: Vec<String>,
}
