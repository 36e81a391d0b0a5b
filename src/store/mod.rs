pub mod reader;
pub mod writer;

use std::path::PathBuf;

use thiserror::Error;

pub use reader::{read_keywords, read_source_list, read_text};
pub use writer::{ChunkedWriter, Columns, WriteOutcome, WriteReport};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{encoding} cannot represent {character:?} (writing {path})")]
    Unmappable {
        path: PathBuf,
        encoding: &'static str,
        character: char,
    },
}
