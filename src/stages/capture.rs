//! Capture: seed the own-source list read back by combine.

use crate::config::PathsConfig;
use crate::domain::Origin;
use crate::merge::dedup;
use crate::normalizer::{sanitize_all, Normalizer};
use crate::store::{read_source_list, ChunkedWriter, Columns};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureSummary {
    pub entries: usize,
    /// False when the entries only reached the `_log.txt` dump, or nowhere
    pub written: bool,
}

/// Returns `None` when there was no input and the existing own-source file
/// was left alone.
pub fn capture(paths: &PathsConfig, normalizer: &Normalizer, writer: &ChunkedWriter) -> Option<CaptureSummary> {
    if !paths.capture_input.exists() {
        tracing::info!(
            "{} not found, keeping {}",
            paths.capture_input.display(),
            paths.own_source.display()
        );
        return None;
    }

    let list = read_source_list(&paths.capture_input, Origin::Own, normalizer);
    let entries = dedup(sanitize_all(list.entries));

    let outcome = writer.write_or_dump(&paths.own_source, &entries, Columns::NameAddress);
    Some(CaptureSummary {
        entries: entries.len(),
        written: outcome.is_written(),
    })
}
