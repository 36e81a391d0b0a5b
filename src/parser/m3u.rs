//! Extended M3U playlists.
//!
//! ```text
//! #EXTM3U
//! #EXTINF:-1 tvg-id="cctv1" group-title="央视",CCTV-1
//! http://example/cctv1.m3u8
//! ```

use crate::domain::RawRecord;
use crate::parser::{plain, ParseReport};

pub const HEADER: &str = "#EXTM3U";
const EXTINF: &str = "#EXTINF";
const ADDRESS_PREFIXES: &[&str] = &["http", "rtmp", "p3p"];

/// Parse an M3U body.
///
/// Every address line following an `#EXTINF` becomes one record under that
/// `#EXTINF`'s name. Plain `name,address` lines mixed into the playlist are
/// harvested as well.
pub fn parse(text: &str) -> ParseReport {
    let mut report = ParseReport::default();
    let mut current_name: Option<String> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with(EXTINF) {
            current_name = extinf_name(line);
            if current_name.is_none() {
                tracing::debug!("EXTINF without a name: {}", line);
                report.skipped += 1;
            }
            continue;
        }

        if line.starts_with('#') {
            continue;
        }

        let result = match &current_name {
            Some(name) if is_address_line(line) => Ok(vec![RawRecord::new(name.as_str(), line)]),
            _ => plain::parse_line(line),
        };
        report.absorb_line(line, result);
    }

    report
}

/// The display name is whatever follows the last comma.
fn extinf_name(line: &str) -> Option<String> {
    let (_, name) = line.rsplit_once(',')?;
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

fn is_address_line(line: &str) -> bool {
    ADDRESS_PREFIXES.iter().any(|p| line.starts_with(p))
}
