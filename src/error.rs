use thiserror::Error;

use crate::pos::PartOfSpeech;

pub type PassphraseResult<T> = Result<T, PassphraseError>;

#[derive(Error, Debug)]
pub enum PassphraseError {
    #[error("Cannot generate phrase of length {length}")]
    UnsupportedLength { length: usize },

    #[error("No words available for {category}")]
    EmptyLexicon { category: PartOfSpeech },

    #[error("Invalid template catalog: {reason}")]
    InvalidCatalog { reason: String },

    #[error("Could not split length {length} within buffer {buffer} after {attempts} attempts")]
    DecompositionStalled {
        length: usize,
        buffer: usize,
        attempts: usize,
    },

    #[error("Worker count must be at least 1")]
    InvalidWorkerCount,

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),
}
