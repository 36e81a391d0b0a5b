//! Split: group cleaned entries into one file per canonical channel.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::config::PathsConfig;
use crate::domain::{Entry, Origin};
use crate::stages::channel_file;
use crate::store::{read_text, ChunkedWriter, Columns};

/// One `[channel]:alias1,alias2` line from the alias dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub channel: String,
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SplitSummary {
    pub channels_written: usize,
    pub entries_written: usize,
}

pub fn parse_aliases(text: &str) -> Vec<Alias> {
    text.lines()
        .map(str::trim)
        .filter(|l| l.starts_with('['))
        .filter_map(|line| {
            let (channel, names) = line.split_once(':')?;
            let channel = channel.trim_matches(|c| c == '[' || c == ']').trim();
            if channel.is_empty() {
                return None;
            }
            let names = names
                .split(',')
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .collect();
            Some(Alias {
                channel: channel.to_string(),
                names,
            })
        })
        .collect()
}

/// `name,address` lines as written by combine and clean.
fn read_entries(path: &Path) -> Option<Vec<Entry>> {
    let text = read_text(path)?;
    let entries = text
        .lines()
        .filter_map(|line| line.split_once(','))
        .map(|(name, address)| Entry::new(name.trim(), address.trim(), Origin::Local))
        .collect();
    Some(entries)
}

pub fn split(paths: &PathsConfig, writer: &ChunkedWriter) -> SplitSummary {
    let Some(aliases) = read_text(&paths.aliases).map(|t| parse_aliases(&t)) else {
        tracing::warn!("{} not found, skipping split", paths.aliases.display());
        return SplitSummary::default();
    };
    let Some(entries) = read_entries(&paths.all_source_cleaned) else {
        tracing::warn!(
            "{} not found, nothing to split",
            paths.all_source_cleaned.display()
        );
        return SplitSummary::default();
    };

    let mut by_name: HashMap<&str, Vec<&Entry>> = HashMap::new();
    for entry in &entries {
        by_name.entry(entry.name.as_str()).or_default().push(entry);
    }

    let mut summary = SplitSummary::default();
    for alias in aliases.iter().filter(|a| !a.names.is_empty()) {
        let mut seen = HashSet::new();
        let channel_entries: Vec<Entry> = alias
            .names
            .iter()
            .flat_map(|name| by_name.get(name.as_str()).into_iter().flatten())
            .filter(|entry| seen.insert(entry.address.as_str()))
            .map(|entry| Entry::new(alias.channel.as_str(), entry.address.as_str(), entry.origin))
            .collect();

        if channel_entries.is_empty() {
            tracing::info!("No entries for channel {}", alias.channel);
            continue;
        }

        let path = channel_file(&paths.channels_dir, &alias.channel, "");
        if writer
            .write_or_dump(&path, &channel_entries, Columns::NameAddress)
            .is_written()
        {
            tracing::debug!("Wrote {} entries for {}", channel_entries.len(), alias.channel);
            summary.channels_written += 1;
            summary.entries_written += channel_entries.len();
        }
    }

    tracing::info!(
        "Split {} entries into {} channel files",
        summary.entries_written,
        summary.channels_written
    );
    summary
}
