use std::path::PathBuf;

use thiserror::Error;

use crate::vocabulary::EntryOrigin;

/// All errors produced by lexis-core.
#[derive(Debug, Error)]
pub enum LexisError {
    #[error("word `{token}` is not in words but exists in {origin}")]
    MissingWord { token: String, origin: EntryOrigin },

    #[error("{origin} is blank")]
    BlankEntry { origin: EntryOrigin },

    #[error("word `{0}` appears more than once in the word list")]
    DuplicateWord(String),

    #[error("word list is empty and there are no sentences to build a corpus from")]
    EmptyVocabulary,

    #[error("language model compiler failed ({}): {detail}", .script.display())]
    Compile { script: PathBuf, detail: String },

    #[error("settings error: {0}")]
    Settings(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LexisError {
    /// `true` for failures caused by the request content rather than the
    /// environment (missing words, blank entries, duplicate keys, nothing to
    /// build a corpus from).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LexisError::MissingWord { .. }
                | LexisError::BlankEntry { .. }
                | LexisError::DuplicateWord(_)
                | LexisError::EmptyVocabulary
        )
    }
}

pub type Result<T> = std::result::Result<T, LexisError>;
