use std::path::Path;

use url::Url;

use crate::domain::{Entry, Origin};
use crate::fetcher::Fetcher;
use crate::normalizer::Normalizer;
use crate::parser;
use crate::store::read_text;

/// Everything harvested from one pass over the subscription list.
#[derive(Debug, Default)]
pub struct Harvest {
    pub entries: Vec<Entry>,
    /// Subscriptions that produced an error instead of a body
    pub failed: Vec<String>,
    /// Malformed lines dropped across all bodies
    pub skipped_lines: usize,
}

/// Read subscription targets, skipping blank and `#` lines.
///
/// Lines naming an existing local file are turned into `file://` URLs.
pub fn read_subscriptions(path: &Path) -> Vec<String> {
    let Some(text) = read_text(path) else {
        return Vec::new();
    };

    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(resolve_target)
        .collect()
}

fn resolve_target(line: &str) -> String {
    if Url::parse(line).is_ok() {
        return line.to_string();
    }

    std::fs::canonicalize(line)
        .ok()
        .and_then(|abs| Url::from_file_path(abs).ok())
        .map(String::from)
        .unwrap_or_else(|| line.to_string())
}

/// Fetch and parse every subscription in order, one at a time.
///
/// A failing subscription is logged and contributes nothing; the rest of
/// the batch carries on.
pub async fn fetch_subscriptions<F>(fetcher: &F, urls: &[String], normalizer: &Normalizer) -> Harvest
where
    F: Fetcher + ?Sized,
{
    let mut harvest = Harvest::default();

    for url in urls {
        let body = match fetcher.fetch(url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Subscription failed: {} - {}", url, e);
                harvest.failed.push(url.clone());
                continue;
            }
        };

        let report = parser::parse_body(&body);
        let entries = normalizer.normalize_all(&report.records, Origin::Network);
        tracing::info!(
            "Fetched {} entries from {} ({} lines skipped)",
            entries.len(),
            url,
            report.skipped
        );

        harvest.skipped_lines += report.skipped;
        harvest.entries.extend(entries);
    }

    harvest
}
