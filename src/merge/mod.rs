//! Concatenation and first-seen-wins deduplication.

use std::collections::HashSet;

use crate::domain::{Entry, SourceList};

/// Drop every entry whose `(name, address)` pair was already seen.
///
/// Order is preserved, so whatever arrives first is kept.
pub fn dedup(entries: impl IntoIterator<Item = Entry>) -> Vec<Entry> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| {
            let (name, address) = entry.key();
            seen.insert((name.to_string(), address.to_string()))
        })
        .collect()
}

/// Concatenate source lists in the order given and deduplicate once.
///
/// Callers pass lists highest priority first.
pub fn merge(lists: impl IntoIterator<Item = SourceList>) -> Vec<Entry> {
    let mut total = 0;
    let combined: Vec<Entry> = lists
        .into_iter()
        .flat_map(|list| {
            tracing::debug!("Merging {} entries from {} source", list.len(), list.origin);
            total += list.len();
            list.entries
        })
        .collect();

    let merged = dedup(combined);
    tracing::info!(
        "Merged {} entries into {} unique ({} duplicates)",
        total,
        merged.len(),
        total - merged.len()
    );
    merged
}
