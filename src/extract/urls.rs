// src/extract/urls.rs
// =============================================================================
// Finds URLs in plain text and removes exact duplicates.
//
// A URL is any token starting with http://, https:// or www. and running up
// to the next whitespace, quote or angle bracket. No normalisation happens:
// "https://a.com" and "https://a.com/" are two different URLs.
// =============================================================================

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https?://[^\s<>"]+|www\.[^\s<>"]+"#).expect("valid URL regex")
});

/// Every URL in `text`, in order of appearance, duplicates included.
pub fn extract_urls(text: &str) -> Vec<String> {
    URL_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Drops repeated URLs by exact string match, keeping the first occurrence.
pub fn dedup_urls<I>(urls: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    urls.into_iter()
        .filter(|url| seen.insert(url.clone()))
        .collect()
}
