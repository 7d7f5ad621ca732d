//! Small text helpers shared across the crawler.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` bytes with an ellipsis and byte
/// count indicator appended. Used for markup previews when a page doesn't
/// match the expected structure.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…(+{} bytes)", &s[..end], s.len() - end)
    }
}

/// Collapse internal whitespace runs to single spaces and trim.
///
/// Scraped heading text often carries markup line breaks and indentation;
/// titles are normalized through this before validation.
pub fn collapse_ws(s: &str) -> String {
    RE_WHITESPACE.replace_all(s.trim(), " ").to_string()
}
