use html_escape::decode_html_entities;
use once_cell::sync::Lazy;
use regex::Regex;
use zhconv::{zhconv, Variant};

use crate::config::NormalizeConfig;
use crate::domain::{Entry, Origin, RawRecord};

/// `CCTV-5`, `CCTV 05`, `CCTV_5` → `CCTV5`
static NUMBERED_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]+)[-_ ]?0*(\d+)").expect("valid numbered prefix regex"));

/// Characters the line-oriented output format cannot carry.
const FORBIDDEN: &[char] = &['\r', '\n', ',', ';', '"', '\''];

/// Turns raw parser output into comparable entries.
#[derive(Clone)]
pub struct Normalizer {
    cosmetic_tokens: Vec<String>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(&NormalizeConfig::default())
    }
}

impl Normalizer {
    pub fn new(config: &NormalizeConfig) -> Self {
        Self {
            cosmetic_tokens: config
                .cosmetic_tokens
                .iter()
                .filter(|t| !t.is_empty())
                .cloned()
                .collect(),
        }
    }

    /// Normalize one parsed record. Returns `None` when nothing usable is left.
    pub fn normalize(&self, record: &RawRecord, origin: Origin) -> Option<Entry> {
        let name = self.normalize_name(&record.name);
        let (address, extra) = split_extra(&record.address);

        if name.is_empty() || address.is_empty() {
            return None;
        }

        Some(Entry::new(name, address, origin).with_extra(extra))
    }

    pub fn normalize_all<'a>(
        &self,
        records: impl IntoIterator<Item = &'a RawRecord>,
        origin: Origin,
    ) -> Vec<Entry> {
        records
            .into_iter()
            .filter_map(|r| self.normalize(r, origin))
            .collect()
    }

    pub fn normalize_name(&self, name: &str) -> String {
        let mut name = zhconv(name.trim(), Variant::ZhHans);

        for token in &self.cosmetic_tokens {
            if name.contains(token.as_str()) {
                name = name.replace(token.as_str(), "");
            }
        }

        let name = name.replace("PLUS", "+");
        let name = name.trim();
        NUMBERED_PREFIX.replace(name, "${1}${2}").trim().to_string()
    }
}

/// Cut the address at its last `$`. The tail becomes the entry's extra info.
pub fn split_extra(address: &str) -> (String, String) {
    match address.rsplit_once('$') {
        Some((address, extra)) => {
            let extra: String = extra.chars().filter(|c| !c.is_control()).collect();
            (address.trim().to_string(), extra.trim().to_string())
        }
        None => (address.trim().to_string(), String::new()),
    }
}

/// Final cleanup over the combined set, right before deduplication.
pub fn sanitize(entry: Entry) -> Option<Entry> {
    let name = sanitize_field(&entry.name);
    let address = sanitize_field(&entry.address);
    if name.is_empty() || address.is_empty() {
        return None;
    }

    Some(Entry {
        name,
        address,
        extra: sanitize_field(&entry.extra),
        origin: entry.origin,
    })
}

pub fn sanitize_all(entries: impl IntoIterator<Item = Entry>) -> Vec<Entry> {
    entries.into_iter().filter_map(sanitize).collect()
}

fn sanitize_field(value: &str) -> String {
    decode_html_entities(value)
        .chars()
        .filter(|c| !FORBIDDEN.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(line: &str) -> Entry {
        let (name, address) = line.split_once(',').unwrap();
        Normalizer::default()
            .normalize(&RawRecord::new(name, address), Origin::Network)
            .unwrap()
    }

    #[test]
    fn test_numbered_prefix() {
        assert_eq!(normalized("CCTV-5,http://x").name, "CCTV5");
        assert_eq!(normalized("CCTV05,http://x").name, "CCTV5");
        assert_eq!(normalized("CCTV 10,http://x").name, "CCTV10");
        assert_eq!(normalized("CCTV-5+,http://x").name, "CCTV5+");
    }

    #[test]
    fn test_cosmetic_tokens_stripped() {
        assert_eq!(normalized("NewTV-1高清,http://x").name, "NewTV1");
        assert_eq!(normalized("CCTV-1[IPV6],http://x").name, "CCTV1");
        assert_eq!(normalized("湖南卫视「IPV6」,http://x").name, "湖南卫视");
    }

    #[test]
    fn test_plus_token() {
        assert_eq!(normalized("CCTV5PLUS,http://x").name, "CCTV5+");
    }

    #[test]
    fn test_traditional_to_simplified() {
        assert_eq!(normalized("鳳凰衛視,http://x").name, "凤凰卫视");
    }

    #[test]
    fn test_address_cut_at_last_dollar() {
        let entry = normalized("Chan,http://x$a$line 2");
        assert_eq!(entry.address, "http://x$a");
        assert_eq!(entry.extra, "line 2");

        let entry = normalized("Chan,http://x$extra");
        assert_eq!(entry.address, "http://x");
        assert_eq!(entry.extra, "extra");
    }

    #[test]
    fn test_extra_loses_control_characters() {
        let (_, extra) = split_extra("http://x$a\u{7}b\tc");
        assert_eq!(extra, "abc");
    }

    #[test]
    fn test_empty_after_normalization() {
        let record = RawRecord::new("高清", "http://x");
        assert!(Normalizer::default().normalize(&record, Origin::Local).is_none());

        let record = RawRecord::new("A", "$only-extra");
        assert!(Normalizer::default().normalize(&record, Origin::Local).is_none());
    }

    #[test]
    fn test_custom_tokens_keep_order() {
        let config = NormalizeConfig {
            cosmetic_tokens: vec!["-HD".into(), "HD".into()],
        };
        let normalizer = Normalizer::new(&config);
        assert_eq!(normalizer.normalize_name("Movie-HD"), "Movie");
    }

    #[test]
    fn test_sanitize_strips_separators_and_entities() {
        let entry = Entry::new("A&amp;B;\r\n", "http://x/?a=1,2", Origin::Network)
            .with_extra("\"quoted\"");
        let entry = sanitize(entry).unwrap();
        assert_eq!(entry.name, "A&B");
        assert_eq!(entry.address, "http://x/?a=12");
        assert_eq!(entry.extra, "quoted");
    }

    #[test]
    fn test_sanitize_drops_hollow_entries() {
        assert!(sanitize(Entry::new(",;", "http://x", Origin::Local)).is_none());
    }
}
