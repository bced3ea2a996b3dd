use std::path::PathBuf;

use thiserror::Error;

use crate::quiz::grammar::{Definiteness, Number};

#[derive(Debug, Error)]
pub enum QuizError {
    /// No noun in the lexicon has the form a sampled phrase needs.
    #[error("lexicon has no noun with a {number} {definiteness} form")]
    LexiconGap {
        number: Number,
        definiteness: Definiteness,
    },

    #[error("lexicon has no {0}")]
    EmptyLexicon(&'static str),

    #[error("malformed entry in {} at row {row}: {reason}", .file.display())]
    MalformedLexiconEntry {
        file: PathBuf,
        row: u64,
        reason: String,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
