//! The pipeline stages, in the order they run.
//!
//! ```text
//! capture → combine → clean → split → pick → result
//! ```
//!
//! Every stage reads the files the previous one wrote, so they can also be
//! run one at a time.

pub mod capture;
pub mod clean;
pub mod combine;
pub mod pick;
pub mod result;
pub mod split;

use std::fs;
use std::path::{Path, PathBuf};

use crate::app::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Capture,
    Combine,
    Clean,
    Split,
    Pick,
    Result,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Capture,
        Stage::Combine,
        Stage::Clean,
        Stage::Split,
        Stage::Pick,
        Stage::Result,
    ];

    /// 1-based position in the pipeline.
    pub fn number(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0) + 1
    }

    pub fn description(self) -> &'static str {
        match self {
            Stage::Capture => "capturing own sources",
            Stage::Combine => "combining sources",
            Stage::Clean => "cleaning sources",
            Stage::Split => "splitting channels",
            Stage::Pick => "picking preferred sources",
            Stage::Result => "rendering user channel list",
        }
    }
}

/// Per-channel file inside the channels directory, e.g. `CCTV1_picked.txt`.
pub fn channel_file(dir: &Path, channel: &str, suffix: &str) -> PathBuf {
    let safe: String = channel
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect();
    dir.join(format!("{}{}.txt", safe, suffix))
}

/// Write whole lines, creating the parent directory first.
pub(crate) fn write_lines<'a>(path: &Path, lines: impl IntoIterator<Item = &'a str>) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut out = String::new();
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    fs::write(path, out)?;
    Ok(())
}
