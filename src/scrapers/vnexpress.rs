//! VnExpress article scraper.
//!
//! Scrapes [VnExpress](https://vnexpress.net), Vietnam's largest online
//! newspaper. Category pages list articles newest-first as
//! `article.item-news` entries; article pages carry the headline in
//! `h1.title-detail`, the body in `article.fck_detail`, and a localized
//! publish-date string like `"Thứ năm, 21/2/2025, 09:56 (GMT+7)"`.
//!
//! # Date Format
//!
//! The publish date is comma-delimited: weekday name, `day/month/year`,
//! then `HH:MM (GMT+7)`. The weekday and zone annotation are discarded and
//! the remainder is interpreted as local civil time. Any deviation from
//! this shape is a [`CrawlError::DateFormat`], never a panic: the format
//! is undocumented and has changed before.

use crate::error::{CrawlError, Result};
use crate::models::Article;
use crate::utils::collapse_ws;
use chrono::{Local, NaiveDateTime, TimeZone};
use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use tracing::{debug, info, warn};
use url::Url;

static ENTRY: Lazy<Selector> = Lazy::new(|| Selector::parse("article.item-news").unwrap());
static TITLE_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("h3.title-news > a").unwrap());
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h1.title-detail").unwrap());
static CONTENT: Lazy<Selector> = Lazy::new(|| Selector::parse("article.fck_detail").unwrap());
static DATE: Lazy<Selector> = Lazy::new(|| Selector::parse(".header-content .date").unwrap());
static DESCRIPTION: Lazy<Selector> = Lazy::new(|| Selector::parse("p.description").unwrap());
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());
static STRIPPED: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".box_embed_video p, .box_ins_readmore p").unwrap());

/// Extract article URLs from a category/listing page.
///
/// Walks each `article.item-news` entry and takes its title link, resolved
/// against `base`. Only links on the same host as the listing (or a
/// subdomain of it) are kept, in the order they appear. Listing order is
/// recency order on the site.
///
/// Never fails: markup that doesn't match yields an empty vector, which the
/// caller logs as "nothing found".
pub fn extract_article_links(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);

    let mut links = Vec::new();
    for entry in document.select(&ENTRY) {
        let Some(anchor) = entry.select(&TITLE_LINK).next() else {
            continue;
        };
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        match base.join(href) {
            Ok(resolved) if same_site(&resolved, base) => links.push(resolved.to_string()),
            Ok(resolved) => debug!(url = %resolved, "Skipping off-site link"),
            Err(e) => debug!(href, error = %e, "Skipping unresolvable link"),
        }
    }

    info!(count = links.len(), "Extracted article links from listing");
    links
}

fn same_site(link: &Url, base: &Url) -> bool {
    match (link.host_str(), base.host_str()) {
        (Some(link_host), Some(base_host)) => {
            link_host == base_host || link_host.ends_with(&format!(".{base_host}"))
        }
        _ => false,
    }
}

/// Parse a single article page into an [`Article`].
///
/// Embedded-video (`.box_embed_video`) and read-more promo
/// (`.box_ins_readmore`) blocks inside the body are excluded before the
/// paragraphs are joined. The short description, when present, leads the
/// content followed by a blank line.
///
/// # Errors
///
/// [`CrawlError::MissingField`] when the title, body, or date node is
/// absent or empty; [`CrawlError::DateFormat`] when the date string does
/// not normalize.
pub fn parse_article(html: &str, url: &str) -> Result<Article> {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE)
        .next()
        .map(|node| collapse_ws(&node.text().collect::<String>()))
        .unwrap_or_default();

    let content = match document.select(&CONTENT).next() {
        Some(container) => extract_content(container, document.select(&DESCRIPTION).next()),
        None => String::new(),
    };

    let date_text = document
        .select(&DATE)
        .next()
        .map(|node| node.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    if title.is_empty() {
        warn!(%url, "Article page has no title");
        return Err(CrawlError::MissingField { field: "title" });
    }
    if content.is_empty() {
        warn!(%url, content_len = 0, "Article page has no body content");
        return Err(CrawlError::MissingField { field: "content" });
    }
    if date_text.is_empty() {
        warn!(%url, "Article page has no publish date");
        return Err(CrawlError::MissingField { field: "publish_date" });
    }

    let publish_date = parse_publish_date(&date_text).inspect_err(|_| {
        warn!(%url, raw = %date_text, "Failed to parse publish date");
    })?;

    debug!(%url, %title, content_len = content.len(), "Parsed article");
    Ok(Article {
        url: url.to_string(),
        title,
        content,
        publish_date,
        crawled_at: Some(Local::now().timestamp()),
    })
}

/// Join the body paragraphs, excluding video and promo sub-blocks, and
/// prepend the description when one exists.
fn extract_content(container: ElementRef<'_>, description: Option<ElementRef<'_>>) -> String {
    let stripped: HashSet<_> = container.select(&STRIPPED).map(|p| p.id()).collect();

    let body = container
        .select(&PARAGRAPH)
        .filter(|p| !stripped.contains(&p.id()))
        .map(|p| p.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .join("\n");

    match description.map(|d| d.text().collect::<String>().trim().to_string()) {
        Some(lede) if !lede.is_empty() && !body.is_empty() => format!("{lede}\n\n{body}"),
        Some(lede) if !lede.is_empty() => lede,
        _ => body,
    }
}

/// Normalize the site's localized date string to Unix seconds.
///
/// Splits on commas, takes the second segment as `day/month/year` and the
/// third (up to its first `(`) as `HH:MM`, and interprets the combination
/// as local civil time.
pub fn parse_publish_date(raw: &str) -> Result<i64> {
    let date_format_err = || CrawlError::DateFormat {
        raw: raw.to_string(),
    };

    let segments: Vec<&str> = raw.split(',').collect();
    if segments.len() < 3 {
        return Err(date_format_err());
    }
    let date = segments[1].trim();
    let time = segments[2].split('(').next().unwrap_or("").trim();

    let naive = NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%d/%m/%Y %H:%M")
        .map_err(|_| date_format_err())?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp())
        .ok_or_else(date_format_err)
}
