pub mod decode;
pub mod m3u;
pub mod plain;

use thiserror::Error;

use crate::domain::RawRecord;

pub use decode::decode_body;

/// Why a line produced no records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("blank line")]
    Blank,

    #[error("comment line")]
    Comment,

    #[error("genre header")]
    GenreHeader,

    #[error("missing comma between name and address")]
    MissingComma,

    #[error("missing channel name")]
    MissingName,

    #[error("not a playback address: {0}")]
    NotAnAddress(String),
}

impl ParseError {
    /// Structural lines that are expected in every list and never counted.
    pub fn is_ignorable(&self) -> bool {
        matches!(self, Self::Blank | Self::Comment | Self::GenreHeader)
    }
}

/// Records harvested from one body, plus how many malformed lines were dropped.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParseReport {
    pub records: Vec<RawRecord>,
    pub skipped: usize,
}

impl ParseReport {
    pub(crate) fn absorb_line(&mut self, line: &str, result: Result<Vec<RawRecord>, ParseError>) {
        match result {
            Ok(mut records) => self.records.append(&mut records),
            Err(e) if e.is_ignorable() => {}
            Err(e) => {
                tracing::debug!("Skipping line {:?}: {}", line, e);
                self.skipped += 1;
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    M3u,
    Plain,
}

/// M3U when the first non-empty line carries the `#EXTM3U` header.
pub fn detect_format(text: &str) -> Format {
    let first = text
        .lines()
        .map(|l| l.trim_start_matches('\u{feff}').trim())
        .find(|l| !l.is_empty());

    match first {
        Some(line) if line.starts_with(m3u::HEADER) => Format::M3u,
        _ => Format::Plain,
    }
}

/// Parse an already decoded body in whichever format it is written in.
pub fn parse_text(text: &str) -> ParseReport {
    match detect_format(text) {
        Format::M3u => m3u::parse(text),
        Format::Plain => plain::parse(text),
    }
}

/// Decode and parse raw response bytes. Undecodable bodies yield nothing.
pub fn parse_body(bytes: &[u8]) -> ParseReport {
    match decode_body(bytes) {
        Some(text) => parse_text(&text),
        None => {
            tracing::warn!("Could not decode {} bytes as text, ignoring body", bytes.len());
            ParseReport::default()
        }
    }
}
