use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::domain::{Origin, SourceList};
use crate::normalizer::Normalizer;
use crate::parser::{decode_body, plain};

/// Read a text input. A missing or unreadable file is reported and yields `None`.
pub fn read_text(path: &Path) -> Option<String> {
    match fs::read(path) {
        Ok(bytes) => {
            let text = decode_body(&bytes);
            if text.is_none() {
                tracing::warn!("{} is not a text file, ignoring it", path.display());
            }
            text
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!("{} not found, treating it as empty", path.display());
            None
        }
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", path.display(), e);
            None
        }
    }
}

/// Load a local `name,address[$extra]` list as normalized entries.
pub fn read_source_list(path: &Path, origin: Origin, normalizer: &Normalizer) -> SourceList {
    let Some(text) = read_text(path) else {
        return SourceList::empty(origin);
    };

    let report = plain::parse(&text);
    if report.skipped > 0 {
        tracing::debug!("Skipped {} malformed lines in {}", report.skipped, path.display());
    }

    let entries = normalizer.normalize_all(&report.records, origin);
    tracing::info!("Read {} {} entries from {}", entries.len(), origin, path.display());
    SourceList::new(origin, entries)
}

/// Lowercased keyword set, one keyword per line. Blank and `#` lines are ignored.
pub fn read_keywords(path: &Path) -> BTreeSet<String> {
    read_text(path)
        .map(|text| {
            text.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#'))
                .map(str::to_lowercase)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty_source() {
        let dir = tempfile::tempdir().unwrap();
        let list = read_source_list(
            &dir.path().join("absent.txt"),
            Origin::Local,
            &Normalizer::default(),
        );
        assert!(list.is_empty());
        assert_eq!(list.origin, Origin::Local);
    }

    #[test]
    fn test_local_source_is_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("localsource.txt");
        fs::write(
            &path,
            "央视,#genre#\nCCTV-1高清,http://a/1$电信\n# disabled\nbroken\nCCTV-2,http://a/2#http://b/2\n",
        )
        .unwrap();

        let list = read_source_list(&path, Origin::Local, &Normalizer::default());
        let pairs: Vec<_> = list
            .entries
            .iter()
            .map(|e| (e.name.as_str(), e.address.as_str(), e.extra.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("CCTV1", "http://a/1", "电信"),
                ("CCTV2", "http://a/2", ""),
                ("CCTV2", "http://b/2", ""),
            ]
        );
    }

    #[test]
    fn test_keywords_lowercased() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blacklist.txt");
        fs::write(&path, "# comment\n\nExample.COM\n  udp  \n").unwrap();

        let keywords = read_keywords(&path);
        assert_eq!(
            keywords.into_iter().collect::<Vec<_>>(),
            vec!["example.com".to_string(), "udp".to_string()]
        );
    }
}
