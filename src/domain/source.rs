use crate::domain::{Entry, Origin};

/// Ordered entries attributed to a single origin.
#[derive(Debug, Clone)]
pub struct SourceList {
    pub origin: Origin,
    pub entries: Vec<Entry>,
}

impl SourceList {
    pub fn new(origin: Origin, entries: Vec<Entry>) -> Self {
        Self { origin, entries }
    }

    pub fn empty(origin: Origin) -> Self {
        Self::new(origin, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
