use std::fmt;

/// Where an entry was first read from.
///
/// Variants are declared in merge priority order: when two origins carry
/// the same `(name, address)` pair, the earlier variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Origin {
    /// Hand-maintained `user_result` list
    Result,
    /// Local source list
    Local,
    /// Own source list written by the capture stage
    Own,
    /// Fetched subscription
    Network,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Origin::Result => "result",
            Origin::Local => "local",
            Origin::Own => "own",
            Origin::Network => "network",
        };
        f.write_str(label)
    }
}

/// A named playback address, the unit every stage moves around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub address: String,
    pub extra: String,
    pub origin: Origin,
}

impl Entry {
    pub fn new(name: impl Into<String>, address: impl Into<String>, origin: Origin) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            extra: String::new(),
            origin,
        }
    }

    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = extra.into();
        self
    }

    /// The `(name, address)` pair entries are deduplicated on.
    pub fn key(&self) -> (&str, &str) {
        (&self.name, &self.address)
    }
}

/// A `name,address` pair straight out of a parser, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub name: String,
    pub address: String,
}

impl RawRecord {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}
