/// Schemes treated as absolute; anything else is resolved against the origin
const ABSOLUTE_SCHEMES: &[&str] = &["http://", "https://"];

/// Returns true if the link starts with a recognized URL scheme
///
/// The comparison ignores ASCII case, so `HTTPS://example.com` is absolute.
pub fn has_scheme(link: &str) -> bool {
    ABSOLUTE_SCHEMES.iter().any(|scheme| {
        link.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Concatenates a relative link onto an origin
///
/// Leading `/` characters of the link are dropped when the origin already
/// ends with one, so the separator is never doubled.
///
/// # Examples
///
/// ```
/// use sitemapper::url::join_origin;
///
/// assert_eq!(join_origin("https://example.com/", "/about"), "https://example.com/about");
/// assert_eq!(join_origin("https://example.com/base/", "a"), "https://example.com/base/a");
/// ```
pub fn join_origin(origin: &str, link: &str) -> String {
    if origin.ends_with('/') {
        format!("{}{}", origin, link.trim_start_matches('/'))
    } else {
        format!("{}{}", origin, link)
    }
}

/// Resolves every relative link against the base origin
///
/// Links that already carry a scheme pass through unchanged; the rest are
/// prefixed with `base_origin`. Order and duplicates are preserved.
///
/// # Arguments
///
/// * `links` - Links as extracted from a page
/// * `base_origin` - The crawl origin (or the page's declared base)
///
/// # Returns
///
/// Absolute URLs, one per input link
pub fn prepend_origin_if_relative(links: Vec<String>, base_origin: &str) -> Vec<String> {
    links
        .into_iter()
        .map(|link| {
            if has_scheme(&link) {
                link
            } else {
                join_origin(base_origin, &link)
            }
        })
        .collect()
}
