//! Sitemapper: a same-origin sitemap generator
//!
//! This crate crawls a single website breadth-first from a seed URL, follows
//! links that stay within the seed's origin up to a bounded depth, and writes
//! the deduplicated set of discovered URLs as a sitemap document.

pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for sitemapper operations
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("A seed URL is required to start a crawl")]
    MissingSeed,

    #[error("Cannot derive an origin from seed URL '{0}'")]
    InvalidSeed(String),
}

/// Result type alias for sitemapper operations
pub type Result<T> = std::result::Result<T, SitemapError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, CrawlConfig};
pub use crawler::{CrawlReport, Crawler, HttpFetcher};
pub use crate::url::{base_origin, is_in_scope, prepend_origin_if_relative};
