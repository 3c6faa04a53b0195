//! Error types for the search engine
//!
//! Only failures that stop the whole run are represented here. A candidate
//! that the oracle rejects is not an error, whatever the reason.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrackError {
    #[error("failed to open dictionary {path}: {source}")]
    DictionaryOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read dictionary block {block}: {source}")]
    DictionaryRead {
        block: usize,
        #[source]
        source: io::Error,
    },

    #[error("alphabet must contain at least one symbol")]
    EmptyAlphabet,

    #[error("invalid configuration: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("worker thread panicked during {0}")]
    WorkerPanic(&'static str),
}

impl From<figment::Error> for CrackError {
    fn from(err: figment::Error) -> Self {
        CrackError::Config(Box::new(err))
    }
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, CrackError>;
