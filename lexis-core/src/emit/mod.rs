//! Artifact emitter: writes the dictionary, grammar and corpus files into the
//! request's working directory.
//!
//! Each file is rendered to memory first, written through a `BufWriter` into
//! a temporary file in the same directory and renamed over the destination.
//! Readers therefore see either the previous artifact or the complete new
//! one, and every handle is closed before `emit` returns.
//!
//! Files are produced in a fixed order (dictionary, grammar, corpus). Under
//! `ValidationTiming::Interleaved` each collection is validated right before
//! the file that contains it, so a failure leaves the earlier files behind.

pub mod corpus;
pub mod dictionary;
pub mod grammar;

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::config::{normalize_grammar_name, EmitPolicies};
use crate::engine::ValidationTiming;
use crate::error::{LexisError, Result};
use crate::vocabulary::{self, VocabularyRequest};

pub use corpus::{render_corpus, Corpus};
pub use dictionary::{render_dictionary, PhonemePolicy};
pub use grammar::{render_grammar, RuleQuoting};

pub const DICTIONARY_FILE: &str = "custom.dict";
pub const CORPUS_FILE: &str = "sentences.txt";
pub const GRAMMAR_EXTENSION: &str = "gram";

/// One written artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub path: PathBuf,
    /// Lowercase hex SHA-256 of the file content.
    pub sha256: String,
    pub bytes: usize,
}

/// Everything `emit` wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactSet {
    pub dictionary: Artifact,
    pub grammar: Artifact,
    pub corpus: Artifact,
    /// Production count in the grammar file.
    pub productions: usize,
    /// `true` when the corpus was built from the word list.
    pub corpus_from_words: bool,
}

/// Path of the grammar file for `name` inside `dir`.
pub fn grammar_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.{GRAMMAR_EXTENSION}"))
}

/// Write all three artifacts into `target_dir`, creating it if absent.
///
/// # Errors
/// - `LexisError::Settings` if `grammar_name` is not a plain identifier; see
///   [`normalize_grammar_name`]. Nothing is written in that case.
/// - `LexisError::Io` if the directory cannot be created or written.
/// - Validation errors when `timing` is `Interleaved`.
pub fn emit(
    request: &VocabularyRequest,
    target_dir: &Path,
    grammar_name: &str,
    policies: &EmitPolicies,
    timing: ValidationTiming,
) -> Result<ArtifactSet> {
    if normalize_grammar_name(grammar_name) != grammar_name {
        return Err(LexisError::Settings(format!(
            "grammar name `{grammar_name}` is not a plain identifier"
        )));
    }
    fs::create_dir_all(target_dir)?;

    let dictionary = write_artifact(
        target_dir.join(DICTIONARY_FILE),
        &render_dictionary(&request.words, policies.phonemes),
    )?;

    if timing == ValidationTiming::Interleaved {
        vocabulary::validate_grammar(&request.words, &request.grammar)?;
    }
    let grammar = write_artifact(
        grammar_path(target_dir, grammar_name),
        &render_grammar(grammar_name, &request.grammar, policies.quoting),
    )?;

    if timing == ValidationTiming::Interleaved {
        vocabulary::validate_sentences(&request.words, &request.sentences)?;
    }
    let Corpus { text, from_words } = render_corpus(&request.words, &request.sentences);
    let corpus = write_artifact(target_dir.join(CORPUS_FILE), &text)?;

    Ok(ArtifactSet {
        dictionary,
        grammar,
        corpus,
        productions: request.grammar.len(),
        corpus_from_words: from_words,
    })
}

fn write_artifact(path: PathBuf, contents: &str) -> Result<Artifact> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let temp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        writer.write_all(contents.as_bytes())?;
        writer.flush()?;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))?;
    }
    temp.persist(&path).map_err(|e| e.error)?;

    let sha256 = format!("{:x}", Sha256::digest(contents.as_bytes()));
    debug!(path = %path.display(), bytes = contents.len(), %sha256, "artifact written");

    Ok(Artifact {
        path,
        sha256,
        bytes: contents.len(),
    })
}
