//! Anchor link extraction
//!
//! Pages are never parsed as documents. Each line of the raw body is matched
//! against an anchor pattern and every `href` beginning with `http` is kept,
//! in left-to-right order. Relative links are ignored.

use regex::Regex;
use std::sync::LazyLock;

/// Matches `<a ... href="http...">`, capturing everything after the `http` prefix
static ANCHOR_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a\s+(?:[^>]*?\s)?href="http([^"]*)""#).expect("hardcoded regex pattern is valid")
});

/// Extracts every absolute anchor link on one line
///
/// # Arguments
///
/// * `line` - One line of raw page text
///
/// # Returns
///
/// The links found, each with its `http` prefix reattached
///
/// # Example
///
/// ```
/// use hop_crawler::crawler::extract_links;
///
/// let links = extract_links(r#"<a href="http://b.test">B</a> <a href="/rel">R</a>"#);
/// assert_eq!(links, vec!["http://b.test".to_string()]);
/// ```
pub fn extract_links(line: &str) -> Vec<String> {
    ANCHOR_HREF
        .captures_iter(line)
        .filter_map(|caps| caps.get(1))
        .map(|rest| format!("http{}", rest.as_str()))
        .collect()
}

/// Extracts links from every line of a page, preserving line then in-line order
pub fn extract_page_links<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .flat_map(|line| extract_links(line.as_ref()))
        .collect()
}
