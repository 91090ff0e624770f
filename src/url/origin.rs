use crate::ConfigError;

/// Derives the base origin of a crawl from its seed URL
///
/// The origin is the first three `/`-delimited segments of the seed
/// (`scheme:`, the empty segment between the slashes, and the host),
/// always terminated by `/`.
///
/// # Arguments
///
/// * `seed` - The seed URL as supplied by the caller
///
/// # Returns
///
/// * `Ok(String)` - The origin, e.g. `https://example.com/`
/// * `Err(ConfigError::InvalidSeed)` - The seed has no host segment
///
/// # Examples
///
/// ```
/// use sitemapper::url::base_origin;
///
/// assert_eq!(base_origin("https://example.com").unwrap(), "https://example.com/");
/// assert_eq!(base_origin("https://example.com/docs/intro").unwrap(), "https://example.com/");
/// ```
pub fn base_origin(seed: &str) -> Result<String, ConfigError> {
    let origin: String = seed.split_inclusive('/').take(3).collect();
    let host = origin.rsplit('/').find(|s| !s.is_empty()).unwrap_or("");

    if origin.matches('/').count() < 2 || host.is_empty() || host.ends_with(':') {
        return Err(ConfigError::InvalidSeed(seed.to_string()));
    }

    Ok(ensure_trailing_slash(&origin))
}

/// Appends a `/` to the string unless it already ends with one
pub fn ensure_trailing_slash(s: &str) -> String {
    if s.ends_with('/') {
        s.to_string()
    } else {
        format!("{}/", s)
    }
}

/// Returns true if the URL lies within the base origin
///
/// The URL is given a trailing `/` before comparison, so the origin itself
/// (`https://example.com`) is in scope of `https://example.com/`.
///
/// # Examples
///
/// ```
/// use sitemapper::url::is_in_scope;
///
/// assert!(is_in_scope("https://example.com/about", "https://example.com/"));
/// assert!(!is_in_scope("https://other.com/about", "https://example.com/"));
/// ```
pub fn is_in_scope(url: &str, base_origin: &str) -> bool {
    ensure_trailing_slash(url).starts_with(base_origin)
}
