use crate::config::types::{Config, CrawlConfig, HttpConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Upper bound on workers per layer
const MAX_PARALLELISM: usize = 256;

/// Validates the entire configuration
///
/// An empty seed is accepted here so that a config file can leave the seed
/// to the command line; the crawl engine rejects it when the crawl starts.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawler)?;
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawl configuration
pub fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.parallelism < 1 || config.parallelism > MAX_PARALLELISM {
        return Err(ConfigError::Validation(format!(
            "parallelism must be between 1 and {}, got {}",
            MAX_PARALLELISM, config.parallelism
        )));
    }

    if !config.seed_url.is_empty() {
        let url = Url::parse(&config.seed_url).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", config.seed_url, e))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "Seed URL '{}' must use HTTP or HTTPS",
                config.seed_url
            )));
        }
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.sitemap_path.is_empty() {
        return Err(ConfigError::Validation(
            "sitemap_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
