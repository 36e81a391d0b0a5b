//! Pick: keep only whitelisted sources in each channel file.

use std::path::Path;

use crate::app::Result;
use crate::config::PathsConfig;
use crate::parser::plain::GENRE_MARKER;
use crate::stages::clean::mentions_any;
use crate::stages::{channel_file, write_lines};
use crate::store::{read_keywords, read_text};

pub const PICKED_SUFFIX: &str = "_picked";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PickSummary {
    pub channels: usize,
    pub lines_kept: usize,
}

/// Channel names requested by the user template: the first field of every
/// line that is not blank, a comment or a genre header.
pub fn template_channels(path: &Path) -> Vec<String> {
    let Some(text) = read_text(path) else {
        return Vec::new();
    };

    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#') && !l.contains(GENRE_MARKER))
        .filter_map(|l| l.split(',').next())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn pick(paths: &PathsConfig) -> Result<PickSummary> {
    let whitelist = read_keywords(&paths.whitelist);
    if whitelist.is_empty() {
        tracing::warn!("Whitelist is empty, every channel source will be dropped");
    }

    let channels = template_channels(&paths.user_template);
    if channels.is_empty() {
        tracing::warn!("No channels to pick from {}", paths.user_template.display());
        return Ok(PickSummary::default());
    }

    let mut summary = PickSummary::default();
    for channel in &channels {
        let input = channel_file(&paths.channels_dir, channel, "");
        let Some(text) = read_text(&input) else {
            continue;
        };

        let kept: Vec<&str> = text
            .lines()
            .filter(|line| !line.is_empty() && mentions_any(line, &whitelist))
            .collect();

        tracing::info!("Picked {} of {} sources for {}", kept.len(), text.lines().count(), channel);
        summary.channels += 1;
        summary.lines_kept += kept.len();
        write_lines(&channel_file(&paths.channels_dir, channel, PICKED_SUFFIX), kept)?;
    }

    Ok(summary)
}
