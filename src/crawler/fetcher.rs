//! HTTP fetcher implementation
//!
//! This module handles all network retrieval for the crawler:
//! - Building the HTTP client with the configured user agent and timeouts
//! - A single GET per page, with no retry
//! - Folding every failure into a [`FetchResult`] so callers never see an error

use crate::config::HttpConfig;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;

/// Result of a single fetch attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    /// The URL that was requested
    pub url: String,

    /// HTTP status code, when a response arrived
    pub status: Option<u16>,

    /// Page body, present only on success
    pub body: Option<String>,

    /// True if the page was retrieved with a success status
    pub ok: bool,
}

impl FetchResult {
    /// A successful fetch carrying the page body
    pub fn success(url: impl Into<String>, status: u16, body: String) -> Self {
        Self {
            url: url.into(),
            status: Some(status),
            body: Some(body),
            ok: true,
        }
    }

    /// A failed fetch; `status` is set when the server answered with an error
    pub fn failure(url: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            url: url.into(),
            status,
            body: None,
            ok: false,
        }
    }

    /// The body if the fetch succeeded
    pub fn page(&self) -> Option<&str> {
        if self.ok {
            self.body.as_deref()
        } else {
            None
        }
    }
}

/// Retrieves page content for one URL at a time
///
/// Implementations must not fail: any problem is reported as a
/// [`FetchResult`] with `ok == false`.
pub trait PageFetcher: Send + Sync + 'static {
    /// Fetches `url` once
    fn fetch(&self, url: &str) -> impl Future<Output = FetchResult> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use sitemapper::config::HttpConfig;
/// use sitemapper::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with a single GET request
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx with readable body | `ok`, body set |
/// | Non-2xx status | not `ok`, status set |
/// | Body read error | not `ok`, status set |
/// | Transport error (DNS, connect, TLS, timeout) | not `ok`, no status |
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    tracing::debug!("Fetching {}", url);

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            if e.is_timeout() {
                tracing::warn!("Request timeout for {}", url);
            } else if e.is_connect() {
                tracing::warn!("Connection failed for {}: {}", url, e);
            } else {
                tracing::warn!("HTTP error for {}: {}", url, e);
            }
            return FetchResult::failure(url, None);
        }
    };

    let status = response.status();
    if !status.is_success() {
        tracing::warn!("HTTP {} for {}", status.as_u16(), url);
        return FetchResult::failure(url, Some(status.as_u16()));
    }

    match response.text().await {
        Ok(body) => FetchResult::success(url, status.as_u16(), body),
        Err(e) => {
            tracing::warn!("Failed to read body of {}: {}", url, e);
            FetchResult::failure(url, Some(status.as_u16()))
        }
    }
}

/// [`PageFetcher`] backed by a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Wraps an existing client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher from HTTP configuration
    pub fn from_config(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = FetchResult> + Send {
        fetch_url(&self.client, url)
    }
}
