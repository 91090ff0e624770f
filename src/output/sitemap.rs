//! Sitemap XML generation
//!
//! Writes discovered URLs in the sitemaps.org 0.9 format: one `<url>` entry
//! with a single `<loc>` per URL.

use crate::output::traits::{OutputError, OutputResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

const URLSET_OPEN: &str = concat!(
    r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9""#,
    r#" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance""#,
    r#" xsi:schemaLocation="http://www.sitemaps.org/schemas/sitemap/0.9"#,
    r#" http://www.sitemaps.org/schemas/sitemap/0.9/sitemap.xsd">"#,
);

const URLSET_CLOSE: &str = "</urlset>";

/// Escapes the five XML special characters
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Formats URLs as a sitemap document
///
/// # Example
///
/// ```
/// use sitemapper::output::format_sitemap;
///
/// let xml = format_sitemap(&["https://example.com/a".to_string()]);
/// assert!(xml.contains("<url><loc>https://example.com/a</loc></url>"));
/// ```
pub fn format_sitemap(urls: &[String]) -> String {
    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(URLSET_OPEN);
    xml.push('\n');

    for url in urls {
        xml.push_str("  <url><loc>");
        xml.push_str(&escape_xml(url));
        xml.push_str("</loc></url>\n");
    }

    xml.push_str(URLSET_CLOSE);
    xml.push('\n');
    xml
}

/// Writes URLs as a sitemap document to `output_path`
///
/// # Arguments
///
/// * `urls` - The URLs to list, already deduplicated
/// * `output_path` - Path of the file to create or overwrite
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the sitemap
/// * `Err(OutputError)` - Failed to write the sitemap
pub fn write_sitemap(urls: &[String], output_path: &Path) -> OutputResult<()> {
    let file = File::create(output_path).map_err(|e| {
        OutputError::Write(format!("cannot create {}: {}", output_path.display(), e))
    })?;

    let mut writer = BufWriter::new(file);
    writer.write_all(format_sitemap(urls).as_bytes())?;
    writer.flush()?;

    tracing::info!("Wrote {} URLs to {}", urls.len(), output_path.display());
    Ok(())
}
