//! URL handling module for sitemapper
//!
//! This module derives the crawl origin from the seed URL, decides whether a
//! candidate URL falls inside that origin, and resolves relative links
//! against it.
//!
//! All operations here work on plain strings: the origin is a textual prefix
//! and scope is decided by prefix comparison.

mod normalize;
mod origin;

// Re-export main functions
pub use normalize::{has_scheme, join_origin, prepend_origin_if_relative};
pub use origin::{base_origin, ensure_trailing_slash, is_in_scope};
