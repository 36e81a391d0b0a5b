//! `name,address` channel lists, one record (or several) per line.

use crate::domain::RawRecord;
use crate::parser::{ParseError, ParseReport};

pub const GENRE_MARKER: &str = "#genre#";

/// Parse a whole plain-text body.
pub fn parse(text: &str) -> ParseReport {
    let mut report = ParseReport::default();
    for line in text.lines() {
        report.absorb_line(line, parse_line(line));
    }
    report
}

/// Parse one line, which may hold several TAB-separated records.
///
/// Blank, comment and `#genre#` lines come back as errors the caller can
/// tell apart from malformed input via [`ParseError::is_ignorable`].
pub fn parse_line(line: &str) -> Result<Vec<RawRecord>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ParseError::Blank);
    }
    if line.starts_with('#') {
        return Err(ParseError::Comment);
    }
    if line.contains(GENRE_MARKER) {
        return Err(ParseError::GenreHeader);
    }

    if !line.contains('\t') {
        return parse_record(line);
    }

    let mut records = Vec::new();
    let mut last_error = ParseError::Blank;
    for part in line.split('\t').map(str::trim).filter(|p| !p.is_empty()) {
        match parse_record(part) {
            Ok(mut found) => records.append(&mut found),
            Err(e) => last_error = e,
        }
    }

    if records.is_empty() {
        Err(last_error)
    } else {
        Ok(records)
    }
}

/// Split a single `name,address` record, fanning out `#` alternates.
fn parse_record(record: &str) -> Result<Vec<RawRecord>, ParseError> {
    let (name, address) = record.split_once(',').ok_or(ParseError::MissingComma)?;
    let name = name.trim();
    let address = address.trim();

    if name.is_empty() {
        return Err(ParseError::MissingName);
    }
    if !address.contains("://") {
        return Err(ParseError::NotAnAddress(address.to_string()));
    }

    let records: Vec<RawRecord> = address
        .split('#')
        .map(str::trim)
        .filter(|alt| alt.contains("://"))
        .map(|alt| RawRecord::new(name, alt))
        .collect();

    if records.is_empty() {
        return Err(ParseError::NotAnAddress(address.to_string()));
    }
    Ok(records)
}
