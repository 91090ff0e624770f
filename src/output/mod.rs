//! Output module for exporting crawl results
//!
//! This module handles:
//! - Formatting discovered URLs as a sitemap XML document
//! - Writing the document to disk

mod sitemap;
mod traits;

pub use sitemap::{format_sitemap, write_sitemap};
pub use traits::{OutputError, OutputResult};
