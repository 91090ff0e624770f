use crate::crawler::ExtractorKind;
use serde::Deserialize;

/// Main configuration structure for sitemapper
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
}

/// Crawl behavior configuration
///
/// Immutable for the duration of a crawl.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// URL the crawl starts from; its scheme and host define the origin
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Number of concurrent workers per layer
    pub parallelism: usize,

    /// Number of link layers followed beyond the seed's direct links
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Link extraction strategy
    pub extractor: ExtractorKind,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            seed_url: String::new(),
            parallelism: 1,
            max_depth: 1,
            extractor: ExtractorKind::default(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("sitemapper/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the sitemap XML file
    #[serde(rename = "sitemap-path")]
    pub sitemap_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sitemap_path: "sitemap.xml".to_string(),
        }
    }
}
