//! Crawler module for page fetching and link discovery
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching that reports failures as values
//! - Link and base-declaration extraction from page content
//! - Visited-URL tracking shared across concurrent workers
//! - Layer-by-layer crawl orchestration

mod engine;
mod extractor;
mod fetcher;
mod frontier;
mod visited;

pub use engine::{CrawlReport, CrawlStats, Crawler};
pub use extractor::{strip_query, DomExtractor, ExtractorKind, LinkExtractor, PatternExtractor};
pub use fetcher::{build_http_client, fetch_url, FetchResult, HttpFetcher, PageFetcher};
pub use frontier::{dedup_preserving_order, flatten, split_into_chunks};
pub use visited::VisitedTracker;

use crate::config::Config;
use crate::SitemapError;

/// Runs a complete crawl over HTTP
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client from the `[http]` settings
/// 2. Pick the link extractor named in the `[crawler]` settings
/// 3. Crawl from the seed URL up to the configured depth
///
/// # Arguments
///
/// * `config` - The full configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed; individual pages may have failed
/// * `Err(SitemapError)` - Crawl could not start
pub async fn crawl(config: &Config) -> Result<CrawlReport, SitemapError> {
    Crawler::from_config(config)?.start().await
}
