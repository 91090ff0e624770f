//! Visited-URL tracking shared by the workers of one crawl

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Thread-safe record of URLs already scheduled for fetching
///
/// One tracker lives for exactly one crawl and is handed to workers behind
/// an `Arc`. The check and the insert happen under the same lock, so when
/// several workers race on one URL exactly one of them wins.
#[derive(Debug, Default)]
pub struct VisitedTracker {
    urls: Mutex<HashSet<String>>,
}

impl VisitedTracker {
    /// Creates an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `url` as visited
    ///
    /// # Returns
    ///
    /// * `true` - This call was the first to mark `url`; the caller owns the fetch
    /// * `false` - `url` was already marked
    pub fn mark_if_unvisited(&self, url: &str) -> bool {
        let mut urls = self.lock();
        if urls.contains(url) {
            return false;
        }
        urls.insert(url.to_string())
    }

    /// Returns true if `url` has been marked
    pub fn is_visited(&self, url: &str) -> bool {
        self.lock().contains(url)
    }

    /// Number of distinct URLs marked so far
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing has been marked yet
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panicking worker cannot leave the set half-updated, so a poisoned
    // lock still guards a consistent set.
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.urls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
