pub mod entry;
pub mod source;

pub use entry::{Entry, Origin, RawRecord};
pub use source::SourceList;
