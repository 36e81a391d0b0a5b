use encoding_rs::GBK;

/// A decoding attempt. `None` means the bytes are not valid in that encoding.
type Decoder = fn(&[u8]) -> Option<String>;

/// Tried in order, first success wins.
const DECODERS: &[(&str, Decoder)] = &[
    ("utf-8", decode_utf8),
    ("gbk", decode_gbk),
    ("iso-8859-1", decode_latin1),
];

/// Decode a response body, falling back UTF-8 → GBK → ISO-8859-1.
///
/// Returns `None` when every step rejects the bytes.
pub fn decode_body(bytes: &[u8]) -> Option<String> {
    DECODERS.iter().find_map(|(label, decode)| {
        let text = decode(bytes)?;
        tracing::trace!("Decoded {} bytes as {}", bytes.len(), label);
        Some(text)
    })
}

fn decode_utf8(bytes: &[u8]) -> Option<String> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    std::str::from_utf8(bytes).ok().map(str::to_string)
}

fn decode_gbk(bytes: &[u8]) -> Option<String> {
    GBK.decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
}

/// Every byte maps to a code point, so only bodies that look binary are refused.
fn decode_latin1(bytes: &[u8]) -> Option<String> {
    if bytes.contains(&0) {
        return None;
    }
    Some(bytes.iter().map(|&b| b as char).collect())
}
