//! Referential-integrity checks between the word list and the grammar rules /
//! sentences that reference it.
//!
//! An entry passes when the whole entry is itself a word (a multi-word phrase
//! registered verbatim) or when every whitespace-separated token is a word.
//! Grammar rules are checked before sentences, in input order; the first
//! failure wins. A request with neither words nor sentences is rejected
//! because its corpus would be empty.

use tracing::debug;

use super::{EntryOrigin, WordList};
use crate::error::{LexisError, Result};

/// Validate every grammar rule, then every sentence.
///
/// # Errors
/// - `LexisError::MissingWord` with the first unknown token.
/// - `LexisError::BlankEntry` for an empty or whitespace-only entry.
/// - `LexisError::EmptyVocabulary` when both the word list and the sentences
///   are empty.
pub fn validate(words: &WordList, grammar: &[String], sentences: &[String]) -> Result<()> {
    validate_grammar(words, grammar)?;
    validate_sentences(words, sentences)?;
    debug!(
        rules = grammar.len(),
        sentences = sentences.len(),
        "vocabulary references validated"
    );
    Ok(())
}

pub fn validate_grammar(words: &WordList, grammar: &[String]) -> Result<()> {
    for (i, rule) in grammar.iter().enumerate() {
        check_entry(words, rule, || EntryOrigin::GrammarRule {
            index: i + 1,
            text: rule.clone(),
        })?;
    }
    Ok(())
}

pub fn validate_sentences(words: &WordList, sentences: &[String]) -> Result<()> {
    if sentences.is_empty() && words.is_empty() {
        return Err(LexisError::EmptyVocabulary);
    }
    for (i, sentence) in sentences.iter().enumerate() {
        check_entry(words, sentence, || EntryOrigin::Sentence {
            index: i + 1,
            text: sentence.clone(),
        })?;
    }
    Ok(())
}

fn check_entry(words: &WordList, entry: &str, origin: impl FnOnce() -> EntryOrigin) -> Result<()> {
    if entry.trim().is_empty() {
        return Err(LexisError::BlankEntry { origin: origin() });
    }
    if words.contains(entry) {
        return Ok(());
    }
    match entry.split_whitespace().find(|token| !words.contains(token)) {
        Some(token) => Err(LexisError::MissingWord {
            token: token.to_string(),
            origin: origin(),
        }),
        None => Ok(()),
    }
}
