use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;

use crate::config::{ConfigError, OutputConfig};
use crate::domain::Entry;
use crate::store::StoreError;

/// Which fields end up on each output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Columns {
    /// `name,address`
    NameAddress,
    /// `name,address,extra`
    WithExtra,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteReport {
    pub records: usize,
    pub chunks: usize,
}

#[derive(Debug)]
pub enum WriteOutcome {
    Written(WriteReport),
    /// The regular write failed, a `_log.txt` dump was written instead.
    Degraded { error: StoreError, fallback: PathBuf },
    /// Both the regular write and the dump failed.
    Lost {
        error: StoreError,
        fallback_error: StoreError,
    },
}

impl WriteOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written(_))
    }
}

/// Writes entries as delimited text, one bounded chunk at a time.
#[derive(Debug, Clone)]
pub struct ChunkedWriter {
    chunk_size: usize,
    encoding: &'static Encoding,
    fallback: &'static Encoding,
}

impl Default for ChunkedWriter {
    fn default() -> Self {
        Self {
            chunk_size: OutputConfig::default().chunk_size,
            encoding: encoding_rs::UTF_8,
            fallback: encoding_rs::GBK,
        }
    }
}

impl ChunkedWriter {
    pub fn new(config: &OutputConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            chunk_size: config.chunk_size.max(1),
            encoding: encoding_for(&config.encoding)?,
            fallback: encoding_for(&config.fallback_encoding)?,
        })
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Truncate `path`, then append the entries chunk by chunk.
    ///
    /// Fails on the first chunk holding a character the output encoding
    /// cannot represent. The partly written file is removed so readers see
    /// it as missing rather than complete.
    pub fn write(&self, path: &Path, entries: &[Entry], columns: Columns) -> Result<WriteReport, StoreError> {
        let io_err = |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let mut file = File::create(path).map_err(io_err)?;

        let mut chunks = 0;
        for chunk in entries.chunks(self.chunk_size) {
            let text = serialize(chunk, columns);
            let (bytes, _, had_errors) = self.encoding.encode(&text);
            if had_errors {
                drop(file);
                if let Err(e) = fs::remove_file(path) {
                    tracing::warn!("Could not remove partial {}: {}", path.display(), e);
                }
                return Err(StoreError::Unmappable {
                    path: path.to_path_buf(),
                    encoding: self.encoding.name(),
                    character: first_unmappable(self.encoding, &text),
                });
            }
            file.write_all(&bytes).map_err(io_err)?;
            chunks += 1;
        }
        file.flush().map_err(io_err)?;

        tracing::debug!(
            "Wrote {} records to {} in {} chunks",
            entries.len(),
            path.display(),
            chunks
        );
        Ok(WriteReport {
            records: entries.len(),
            chunks,
        })
    }

    /// [`write`](Self::write), falling back to a lossy `_log.txt` dump on failure.
    pub fn write_or_dump(&self, path: &Path, entries: &[Entry], columns: Columns) -> WriteOutcome {
        let error = match self.write(path, entries, columns) {
            Ok(report) => return WriteOutcome::Written(report),
            Err(e) => e,
        };
        tracing::warn!("{}", error);

        let fallback = fallback_path(path);
        match self.dump(&fallback, entries, columns) {
            Ok(()) => {
                tracing::warn!(
                    "Dumped {} records to {} using {}",
                    entries.len(),
                    fallback.display(),
                    self.fallback.name()
                );
                WriteOutcome::Degraded { error, fallback }
            }
            Err(fallback_error) => {
                tracing::error!("Fallback dump failed as well: {}", fallback_error);
                WriteOutcome::Lost {
                    error,
                    fallback_error,
                }
            }
        }
    }

    /// Unmappable characters become numeric character references.
    fn dump(&self, path: &Path, entries: &[Entry], columns: Columns) -> Result<(), StoreError> {
        let text = serialize(entries, columns);
        let (bytes, _, _) = self.fallback.encode(&text);
        fs::write(path, &bytes).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// `output/netsource.txt` → `output/netsource_log.txt`
pub fn fallback_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!("{}_log.txt", stem))
}

pub fn serialize(entries: &[Entry], columns: Columns) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&entry.name);
        out.push(',');
        out.push_str(&entry.address);
        if columns == Columns::WithExtra {
            out.push(',');
            out.push_str(&entry.extra);
        }
        out.push('\n');
    }
    out
}

fn encoding_for(label: &str) -> Result<&'static Encoding, ConfigError> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| ConfigError::UnknownEncoding(label.to_string()))
}

fn first_unmappable(encoding: &'static Encoding, text: &str) -> char {
    let mut buf = [0u8; 4];
    text.chars()
        .find(|c| encoding.encode(c.encode_utf8(&mut buf)).2)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Origin;

    fn entries(n: usize) -> Vec<Entry> {
        (0..n)
            .map(|i| {
                Entry::new(format!("CH{}", i), format!("http://a/{}", i), Origin::Network)
                    .with_extra(format!("x{}", i))
            })
            .collect()
    }

    #[test]
    fn test_chunk_count_and_content() {
        let dir = tempfile::tempdir().unwrap();
        let chunked_path = dir.path().join("chunked.txt");
        let whole_path = dir.path().join("whole.txt");
        let data = entries(7);

        let report = ChunkedWriter::default()
            .with_chunk_size(3)
            .write(&chunked_path, &data, Columns::WithExtra)
            .unwrap();
        assert_eq!(report, WriteReport { records: 7, chunks: 3 });

        let whole = ChunkedWriter::default()
            .write(&whole_path, &data, Columns::WithExtra)
            .unwrap();
        assert_eq!(whole.chunks, 1);

        let chunked = fs::read(&chunked_path).unwrap();
        assert_eq!(chunked, fs::read(&whole_path).unwrap());
        assert_eq!(chunked, serialize(&data, Columns::WithExtra).into_bytes());

        let text = String::from_utf8(chunked).unwrap();
        assert_eq!(text.lines().count(), 7);
        assert_eq!(text.lines().next(), Some("CH0,http://a/0,x0"));
    }

    #[test]
    fn test_exact_multiple_of_chunk_size() {
        let dir = tempfile::tempdir().unwrap();
        let report = ChunkedWriter::default()
            .with_chunk_size(2)
            .write(&dir.path().join("out.txt"), &entries(4), Columns::NameAddress)
            .unwrap();
        assert_eq!(report.chunks, 2);
    }

    #[test]
    fn test_empty_input_truncates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "stale,http://old\n").unwrap();

        let report = ChunkedWriter::default()
            .write(&path, &[], Columns::NameAddress)
            .unwrap();
        assert_eq!(report.chunks, 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_name_address_drops_extra() {
        let data = vec![Entry::new("A", "http://a", Origin::Local).with_extra("gone")];
        assert_eq!(serialize(&data, Columns::NameAddress), "A,http://a\n");
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output").join("channels").join("out.txt");
        ChunkedWriter::default()
            .write(&path, &entries(1), Columns::NameAddress)
            .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_unmappable_character_degrades_to_dump() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("netsource.txt");
        let config = OutputConfig {
            chunk_size: 10,
            encoding: "windows-1252".into(),
            fallback_encoding: "gbk".into(),
        };
        let writer = ChunkedWriter::new(&config).unwrap();
        let data = vec![Entry::new("湖南卫视", "http://a/hunan", Origin::Network)];

        match writer.write_or_dump(&path, &data, Columns::WithExtra) {
            WriteOutcome::Degraded { error, fallback } => {
                assert!(matches!(
                    error,
                    StoreError::Unmappable { character: '湖', .. }
                ));
                assert_eq!(fallback, dir.path().join("netsource_log.txt"));
                let bytes = fs::read(&fallback).unwrap();
                let (text, _, _) = encoding_rs::GBK.decode(&bytes);
                assert_eq!(text, "湖南卫视,http://a/hunan,\n");
            }
            other => panic!("expected degraded write, got {:?}", other),
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_unmappable_later_chunk_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("allsource.txt");
        fs::write(&path, "stale,http://old\n").unwrap();
        let config = OutputConfig {
            chunk_size: 1,
            encoding: "windows-1252".into(),
            fallback_encoding: "gbk".into(),
        };
        let writer = ChunkedWriter::new(&config).unwrap();
        let data = vec![
            Entry::new("A", "http://a", Origin::Local),
            Entry::new("湖南", "http://b", Origin::Local),
        ];

        let result = writer.write(&path, &data, Columns::NameAddress);
        assert!(matches!(result, Err(StoreError::Unmappable { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn test_lost_when_directory_is_unusable() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let outcome = ChunkedWriter::default().write_or_dump(
            &blocker.join("out.txt"),
            &entries(1),
            Columns::NameAddress,
        );
        assert!(matches!(outcome, WriteOutcome::Lost { .. }));
        assert!(!outcome.is_written());
    }

    #[test]
    fn test_unknown_encoding_label() {
        let config = OutputConfig {
            encoding: "klingon".into(),
            ..OutputConfig::default()
        };
        assert!(matches!(
            ChunkedWriter::new(&config),
            Err(ConfigError::UnknownEncoding(_))
        ));
    }

    #[test]
    fn test_fallback_path() {
        assert_eq!(
            fallback_path(Path::new("output/allsource.txt")),
            PathBuf::from("output/allsource_log.txt")
        );
    }
}
