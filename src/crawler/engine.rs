//! Crawl engine - layer-by-layer crawl orchestration
//!
//! The engine walks a site breadth-first. Each layer (the frontier) is split
//! into `parallelism` contiguous chunks, one tokio task per chunk. Every task
//! claims URLs through the shared [`VisitedTracker`], fetches the in-origin
//! ones and collects their child links locally. The orchestrator joins all
//! tasks in spawn order before building the next layer, so results are
//! merged without any shared mutable state besides the visited set.

use crate::config::{Config, CrawlConfig};
use crate::crawler::extractor::LinkExtractor;
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::crawler::frontier::{dedup_preserving_order, flatten, split_into_chunks};
use crate::crawler::visited::VisitedTracker;
use crate::url::{
    base_origin, ensure_trailing_slash, has_scheme, is_in_scope, join_origin,
    prepend_origin_if_relative,
};
use crate::{ConfigError, SitemapError};
use std::sync::Arc;
use std::time::Instant;

/// Counters collected over one crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Layers expanded beyond the seed's direct links
    pub layers: u32,

    /// Pages retrieved successfully, seed included
    pub pages_fetched: usize,

    /// Fetch attempts that produced no page
    pub fetch_failures: usize,

    /// URLs recorded but not fetched because they lie outside the origin
    pub out_of_scope: usize,

    /// URLs skipped because another worker or layer already claimed them
    pub already_visited: usize,

    /// Links discovered, duplicates included
    pub links_discovered: usize,
}

impl CrawlStats {
    fn absorb(&mut self, report: &WorkerReport) {
        self.pages_fetched += report.fetched;
        self.fetch_failures += report.failed;
        self.out_of_scope += report.out_of_scope;
        self.already_visited += report.already_visited;
        self.links_discovered += report.links.len();
    }
}

/// Outcome of a completed crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Origin the crawl was confined to (after any base declaration)
    pub base_origin: String,

    /// Every discovered URL, deduplicated, in discovery order
    pub urls: Vec<String>,

    /// Crawl counters
    pub stats: CrawlStats,
}

/// State of one crawl, discarded when `start` returns
struct CrawlState {
    base_origin: String,
    visited: Arc<VisitedTracker>,
    accumulated: Vec<String>,
}

impl CrawlState {
    fn new(base_origin: String) -> Self {
        Self {
            base_origin,
            visited: Arc::new(VisitedTracker::new()),
            accumulated: Vec::new(),
        }
    }
}

/// What one worker produced for its chunk
#[derive(Debug, Default)]
struct WorkerReport {
    links: Vec<String>,
    fetched: usize,
    failed: usize,
    out_of_scope: usize,
    already_visited: usize,
}

/// A worker task's view of the crawl
struct Worker<F> {
    id: usize,
    fetcher: Arc<F>,
    extractor: Arc<dyn LinkExtractor>,
    visited: Arc<VisitedTracker>,
    base_origin: String,
}

impl<F: PageFetcher> Worker<F> {
    /// Processes the worker's own chunk, and nothing else
    async fn run(self, chunk: Vec<String>) -> WorkerReport {
        let mut report = WorkerReport::default();

        for url in chunk {
            if !self.visited.mark_if_unvisited(&url) {
                tracing::trace!("Worker {} skipping visited {}", self.id, url);
                report.already_visited += 1;
                continue;
            }

            if !is_in_scope(&url, &self.base_origin) {
                tracing::trace!("Worker {} not following out-of-origin {}", self.id, url);
                report.out_of_scope += 1;
                continue;
            }

            let result = self.fetcher.fetch(&url).await;
            match result.page() {
                Some(body) => {
                    let children = prepend_origin_if_relative(
                        self.extractor.extract_links(body),
                        &self.base_origin,
                    );
                    tracing::debug!("Found {} links on {}", children.len(), url);
                    report.fetched += 1;
                    report.links.extend(children);
                }
                None => report.failed += 1,
            }
        }

        report
    }
}

/// Breadth-first, same-origin crawler
///
/// Generic over the [`PageFetcher`] so the network can be replaced in tests;
/// [`Crawler::from_config`] wires up the real HTTP fetcher.
pub struct Crawler<F> {
    config: CrawlConfig,
    fetcher: Arc<F>,
    extractor: Arc<dyn LinkExtractor>,
}

impl Crawler<HttpFetcher> {
    /// Builds a crawler that fetches over HTTP
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sitemapper::config::Config;
    /// use sitemapper::crawler::Crawler;
    ///
    /// # async fn example() -> Result<(), sitemapper::SitemapError> {
    /// let mut config = Config::default();
    /// config.crawler.seed_url = "https://example.com".to_string();
    /// let report = Crawler::from_config(&config)?.start().await?;
    /// println!("{} URLs", report.urls.len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_config(config: &Config) -> Result<Self, SitemapError> {
        let fetcher = HttpFetcher::from_config(&config.http)?;
        Ok(Self::new(
            config.crawler.clone(),
            Arc::new(fetcher),
            config.crawler.extractor.build(),
        ))
    }
}

impl<F: PageFetcher> Crawler<F> {
    /// Creates a crawler from its parts
    pub fn new(config: CrawlConfig, fetcher: Arc<F>, extractor: Arc<dyn LinkExtractor>) -> Self {
        Self {
            config,
            fetcher,
            extractor,
        }
    }

    /// Runs one complete crawl
    ///
    /// 1. Rejects an empty seed or zero parallelism before any request
    /// 2. Derives the origin from the seed, fetches the seed page and lets a
    ///    base declaration on it override the origin
    /// 3. Takes the seed's links as layer 0
    /// 4. Expands layer after layer until `max_depth` layers have been
    ///    followed or a layer comes back empty
    /// 5. Returns the deduplicated list of everything discovered
    ///
    /// Fetch failures never surface here; a page that cannot be fetched
    /// simply contributes no links.
    pub async fn start(&self) -> Result<CrawlReport, SitemapError> {
        let seed = self.config.seed_url.trim();
        if seed.is_empty() {
            return Err(ConfigError::MissingSeed.into());
        }
        if self.config.parallelism == 0 {
            return Err(
                ConfigError::Validation("parallelism must be at least 1".to_string()).into(),
            );
        }

        let started = Instant::now();
        let mut state = CrawlState::new(base_origin(seed)?);
        let mut stats = CrawlStats::default();

        tracing::info!(
            "Crawling {} (origin {}, depth {}, {} workers)",
            seed,
            state.base_origin,
            self.config.max_depth,
            self.config.parallelism
        );

        state.visited.mark_if_unvisited(seed);
        // A bare `scheme://host` seed and its root page are the same document
        if state.base_origin.strip_suffix('/') == Some(seed) {
            state.visited.mark_if_unvisited(&state.base_origin);
        }
        let seed_result = self.fetcher.fetch(seed).await;

        let mut frontier = match seed_result.page() {
            Some(body) => {
                stats.pages_fetched += 1;

                if let Some(declared) = self.extractor.base_href(body) {
                    let declared = if has_scheme(&declared) {
                        declared
                    } else {
                        join_origin(&state.base_origin, &declared)
                    };
                    state.base_origin = ensure_trailing_slash(&declared);
                    tracing::info!("Seed page declares base {}", state.base_origin);
                }

                prepend_origin_if_relative(self.extractor.extract_links(body), &state.base_origin)
            }
            None => {
                stats.fetch_failures += 1;
                tracing::warn!("Seed page {} could not be fetched; nothing to crawl", seed);
                Vec::new()
            }
        };

        stats.links_discovered += frontier.len();
        state.accumulated.extend(frontier.iter().cloned());

        let mut depth = 0;
        while depth < self.config.max_depth && !frontier.is_empty() {
            let reports = self.expand_layer(&state, frontier).await;
            for report in &reports {
                stats.absorb(report);
            }

            frontier = flatten(reports.into_iter().map(|r| r.links).collect());
            state.accumulated.extend(frontier.iter().cloned());
            depth += 1;
            stats.layers = depth;

            tracing::info!(
                "Layer {} done: {} links found, {} pages fetched so far, {} URLs visited",
                depth,
                frontier.len(),
                stats.pages_fetched,
                state.visited.len()
            );
        }

        let urls = dedup_preserving_order(state.accumulated);

        tracing::info!(
            "Crawl completed: {} unique URLs, {} pages fetched, {} failures in {:?}",
            urls.len(),
            stats.pages_fetched,
            stats.fetch_failures,
            started.elapsed()
        );

        Ok(CrawlReport {
            base_origin: state.base_origin,
            urls,
            stats,
        })
    }

    /// Fans one layer out across the workers and joins them in spawn order
    async fn expand_layer(&self, state: &CrawlState, frontier: Vec<String>) -> Vec<WorkerReport> {
        let chunks = split_into_chunks(frontier, self.config.parallelism);

        let mut handles = Vec::with_capacity(chunks.len());
        for (id, chunk) in chunks.into_iter().enumerate() {
            let worker = Worker {
                id,
                fetcher: Arc::clone(&self.fetcher),
                extractor: Arc::clone(&self.extractor),
                visited: Arc::clone(&state.visited),
                base_origin: state.base_origin.clone(),
            };
            handles.push(tokio::spawn(worker.run(chunk)));
        }

        let mut reports = Vec::with_capacity(handles.len());
        for (id, handle) in handles.into_iter().enumerate() {
            match handle.await {
                Ok(report) => reports.push(report),
                Err(e) => tracing::warn!("Worker {} did not finish: {}", id, e),
            }
        }
        reports
    }
}
