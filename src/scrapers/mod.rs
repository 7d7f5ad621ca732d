//! Site-specific markup knowledge, one module per source.
//!
//! Everything that depends on a site's HTML structure (listing selectors,
//! article selectors, the publish-date format) lives inside the source's
//! module and nowhere else, so a markup change on the site is a change to
//! exactly one file.
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | VnExpress | [`vnexpress`] | HTML scraping | Category listings + article pages |
//!
//! Each scraper module exports:
//! - `extract_article_links(html, base)`: Article URLs found on a listing page
//! - `parse_article(html, url)`: A structured [`crate::models::Article`]
//! - `parse_publish_date(raw)`: The site's localized date string as Unix seconds

pub mod vnexpress;
