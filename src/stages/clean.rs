//! Clean: drop `allsource` lines mentioning a blacklisted keyword.

use std::collections::BTreeSet;

use crate::app::Result;
use crate::config::PathsConfig;
use crate::stages::write_lines;
use crate::store::{read_keywords, read_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CleanSummary {
    pub total: usize,
    pub kept: usize,
}

/// Case-insensitive substring match against lowercased keywords.
pub fn mentions_any(line: &str, keywords: &BTreeSet<String>) -> bool {
    let line = line.to_lowercase();
    keywords.iter().any(|k| line.contains(k.as_str()))
}

pub fn clean(paths: &PathsConfig) -> Result<CleanSummary> {
    let blacklist = read_keywords(&paths.blacklist);
    if blacklist.is_empty() {
        tracing::warn!("Blacklist is empty, nothing will be filtered");
    } else {
        tracing::info!("Loaded {} blacklist keywords", blacklist.len());
    }

    let Some(text) = read_text(&paths.all_source) else {
        tracing::error!(
            "{} not found, writing an empty {}",
            paths.all_source.display(),
            paths.all_source_cleaned.display()
        );
        write_lines(&paths.all_source_cleaned, std::iter::empty())?;
        return Ok(CleanSummary::default());
    };

    let mut summary = CleanSummary::default();
    let kept: Vec<&str> = text
        .lines()
        .inspect(|_| summary.total += 1)
        .filter(|line| line.is_empty() || line.starts_with('#') || !mentions_any(line, &blacklist))
        .collect();
    summary.kept = kept.len();

    write_lines(&paths.all_source_cleaned, kept)?;
    tracing::info!(
        "Cleaned {} lines: kept {}, removed {}",
        summary.total,
        summary.kept,
        summary.total - summary.kept
    );
    Ok(summary)
}
