//! Result: substitute picked sources into the user's channel template.

use crate::app::Result;
use crate::config::PathsConfig;
use crate::parser::plain::GENRE_MARKER;
use crate::stages::pick::PICKED_SUFFIX;
use crate::stages::{channel_file, write_lines};
use crate::store::read_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderSummary {
    pub lines: usize,
    pub replaced: usize,
}

/// Returns `None` when there is no template to render.
pub fn render(paths: &PathsConfig) -> Result<Option<RenderSummary>> {
    let Some(template) = read_text(&paths.user_template) else {
        tracing::error!("User template {} not found", paths.user_template.display());
        return Ok(None);
    };

    let mut summary = RenderSummary::default();
    let mut lines: Vec<String> = Vec::new();

    for line in template.lines() {
        summary.lines += 1;
        match substitution(paths, line) {
            Some(content) => {
                summary.replaced += 1;
                lines.extend(content.lines().map(str::to_string));
            }
            None => lines.push(line.to_string()),
        }
    }

    write_lines(&paths.final_result, lines.iter().map(String::as_str))?;
    tracing::info!(
        "Rendered {} with {} channel replacements",
        paths.final_result.display(),
        summary.replaced
    );
    Ok(Some(summary))
}

/// Picked content for a channel line, if there is any to substitute.
fn substitution(paths: &PathsConfig, line: &str) -> Option<String> {
    if line.starts_with('#') || line.contains(GENRE_MARKER) {
        return None;
    }

    let channel = line.split(',').next()?.trim();
    if channel.is_empty() {
        return None;
    }

    let picked = channel_file(&paths.channels_dir, channel, PICKED_SUFFIX);
    if !picked.exists() {
        tracing::debug!("No picked sources for {}, keeping template line", channel);
        return None;
    }
    read_text(&picked)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_render_substitutes_picked_channels() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathsConfig::under(dir.path());
        fs::create_dir_all(dir.path().join("config")).unwrap();
        fs::create_dir_all(&paths.channels_dir).unwrap();
        fs::write(
            &paths.user_template,
            "央视,#genre#\nCCTV1\nCCTV2,placeholder\n# keep me\n",
        )
        .unwrap();
        fs::write(
            paths.channels_dir.join("CCTV1_picked.txt"),
            "CCTV1,http://a/1\nCCTV1,http://b/1\n",
        )
        .unwrap();

        let summary = render(&paths).unwrap().unwrap();
        assert_eq!(summary, RenderSummary { lines: 4, replaced: 1 });
        assert_eq!(
            fs::read_to_string(&paths.final_result).unwrap(),
            "央视,#genre#\nCCTV1,http://a/1\nCCTV1,http://b/1\nCCTV2,placeholder\n# keep me\n"
        );
    }

    #[test]
    fn test_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathsConfig::under(dir.path());
        assert_eq!(render(&paths).unwrap(), None);
        assert!(!paths.final_result.exists());
    }
}
