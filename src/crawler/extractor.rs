//! Link extraction from page content
//!
//! Two strategies sit behind the [`LinkExtractor`] trait:
//! - [`PatternExtractor`] scans the raw text with regular expressions and
//!   tolerates any markup, well-formed or not
//! - [`DomExtractor`] parses the document with `scraper` and walks real
//!   anchor elements
//!
//! Both return link targets exactly as written in the page (minus the query
//! string); resolving them against the origin is the caller's job.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use serde::Deserialize;
use std::sync::Arc;

/// Anchor-like markup: `<a ... href=target`
static ANCHOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<a.+?\s*href\s*=\s*["']?([^"'\s>]+)["']?"#).expect("anchor pattern is valid")
});

/// Base declaration: `<base ... href=target`
static BASE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<base.+?\s*href\s*=\s*["']?([^"'\s>]+)["']?"#).expect("base pattern is valid")
});

/// Schemes that never point at a crawlable page
const NON_NAVIGABLE_SCHEMES: &[&str] = &["mailto:", "javascript:", "tel:", "data:"];

/// Extracts link targets from a page body
pub trait LinkExtractor: Send + Sync {
    /// Returns the targets of anchor-like markup in order of first
    /// appearance, duplicates included, with query strings stripped
    fn extract_links(&self, html: &str) -> Vec<String>;

    /// Returns the target of the page's base declaration, if any
    fn base_href(&self, html: &str) -> Option<String>;
}

/// Link extraction strategy selectable from configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorKind {
    /// Regular-expression scan over the raw text
    #[default]
    Pattern,
    /// Structural parse with `scraper`
    Dom,
}

impl ExtractorKind {
    /// Builds the extractor for this strategy
    pub fn build(self) -> Arc<dyn LinkExtractor> {
        match self {
            Self::Pattern => Arc::new(PatternExtractor),
            Self::Dom => Arc::new(DomExtractor),
        }
    }
}

/// Removes everything from the first `?` onward
///
/// # Examples
///
/// ```
/// use sitemapper::crawler::strip_query;
///
/// assert_eq!(strip_query("/search?q=rust"), "/search");
/// assert_eq!(strip_query("/plain"), "/plain");
/// ```
pub fn strip_query(link: &str) -> &str {
    link.split('?').next().unwrap_or(link)
}

/// Post-processes a raw href: strips the query and drops unusable targets
///
/// A target that still starts with `<` is a fragment of an unterminated
/// anchor, not a link. A target that is empty once the query is gone
/// points nowhere.
fn clean_target(raw: &str) -> Option<String> {
    let target = strip_query(raw.trim());

    if target.is_empty() || target.starts_with('<') {
        return None;
    }

    let lowered = target.to_ascii_lowercase();
    if NON_NAVIGABLE_SCHEMES
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        return None;
    }

    Some(target.to_string())
}

/// Regex-based extractor
///
/// Matches anchor-like text anywhere in the input, which keeps it working on
/// markup a structural parser would reject, at the cost of the occasional
/// false positive.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternExtractor;

impl LinkExtractor for PatternExtractor {
    fn extract_links(&self, html: &str) -> Vec<String> {
        ANCHOR_REGEX
            .captures_iter(html)
            .filter_map(|caps| caps.get(1))
            .filter_map(|m| clean_target(m.as_str()))
            .collect()
    }

    fn base_href(&self, html: &str) -> Option<String> {
        BASE_REGEX
            .captures(html)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .filter(|href| !href.is_empty())
    }
}

/// `scraper`-based extractor
///
/// Only real `<a href>` elements count; links inside comments or script
/// text are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomExtractor;

impl LinkExtractor for DomExtractor {
    fn extract_links(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);

        let Ok(selector) = Selector::parse("a[href]") else {
            return Vec::new();
        };

        document
            .select(&selector)
            .filter_map(|element| element.value().attr("href"))
            .filter_map(clean_target)
            .collect()
    }

    fn base_href(&self, html: &str) -> Option<String> {
        let document = Html::parse_document(html);
        let selector = Selector::parse("base[href]").ok()?;

        document
            .select(&selector)
            .next()
            .and_then(|element| element.value().attr("href"))
            .map(|href| href.trim().to_string())
            .filter(|href| !href.is_empty())
    }
}
