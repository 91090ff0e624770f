//! Frontier helpers: partitioning a layer across workers and merging results

use std::collections::HashSet;

/// Splits `items` into exactly `parts` contiguous chunks
///
/// Every chunk but the last holds `ceil(len / parts)` items; trailing chunks
/// are empty when there are fewer items than parts. `parts` of zero is
/// treated as one.
///
/// # Examples
///
/// ```
/// use sitemapper::crawler::split_into_chunks;
///
/// let urls: Vec<String> = ["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect();
/// let sizes: Vec<usize> = split_into_chunks(urls, 3).iter().map(Vec::len).collect();
/// assert_eq!(sizes, vec![2, 2, 1]);
/// ```
pub fn split_into_chunks(items: Vec<String>, parts: usize) -> Vec<Vec<String>> {
    let parts = parts.max(1);
    let chunk_size = items.len().div_ceil(parts).max(1);

    let mut chunks = Vec::with_capacity(parts);
    let mut remaining = items.into_iter();
    for _ in 0..parts {
        chunks.push(remaining.by_ref().take(chunk_size).collect());
    }
    chunks
}

/// Concatenates per-worker results, one level deep, in worker order
pub fn flatten(nested: Vec<Vec<String>>) -> Vec<String> {
    nested.into_iter().flatten().collect()
}

/// Removes duplicates, keeping the first occurrence of each entry
pub fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
