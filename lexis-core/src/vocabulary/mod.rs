//! Request data model: the word list, grammar rules and example sentences.
//!
//! `WordList` keeps insertion order so that every artifact rendered from it
//! is deterministic. On the wire it is a plain JSON object
//! (`{"yes": ["Y", "EH", "S"]}`); document order is preserved and duplicate
//! keys are rejected.

pub mod validate;

pub use validate::{validate, validate_grammar, validate_sentences};

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{LexisError, Result};

/// One pronunciation entry: a surface token and its phoneme sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub token: String,
    pub phonemes: Vec<String>,
}

/// Ordered token → phoneme-sequence mapping with unique tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    entries: Vec<WordEntry>,
    index: HashMap<String, usize>,
}

impl WordList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a word list from `(token, phonemes)` pairs in iteration order.
    ///
    /// # Errors
    /// `LexisError::DuplicateWord` if a token appears twice.
    pub fn from_pairs<I, T, P, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (T, P)>,
        T: Into<String>,
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::new();
        for (token, phonemes) in pairs {
            list.insert(token, phonemes.into_iter().map(Into::into).collect())?;
        }
        Ok(list)
    }

    /// Append a word. Tokens are unique within a list.
    pub fn insert(&mut self, token: impl Into<String>, phonemes: Vec<String>) -> Result<()> {
        let token = token.into();
        if self.index.contains_key(&token) {
            return Err(LexisError::DuplicateWord(token));
        }
        self.index.insert(token.clone(), self.entries.len());
        self.entries.push(WordEntry { token, phonemes });
        Ok(())
    }

    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    pub fn phonemes(&self, token: &str) -> Option<&[String]> {
        self.index
            .get(token)
            .map(|&i| self.entries[i].phonemes.as_slice())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, WordEntry> {
        self.entries.iter()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.token.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a WordList {
    type Item = &'a WordEntry;
    type IntoIter = std::slice::Iter<'a, WordEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for WordList {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.token, &entry.phonemes)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for WordList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct WordListVisitor;

        impl<'de> Visitor<'de> for WordListVisitor {
            type Value = WordList;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from word to its phoneme list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<WordList, A::Error> {
                let mut list = WordList::new();
                while let Some((token, phonemes)) = access.next_entry::<String, Vec<String>>()? {
                    list.insert(token, phonemes)
                        .map_err(<A::Error as serde::de::Error>::custom)?;
                }
                Ok(list)
            }
        }

        deserializer.deserialize_map(WordListVisitor)
    }
}

/// A vocabulary-configuration request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyRequest {
    pub words: WordList,
    #[serde(default)]
    pub grammar: Vec<String>,
    #[serde(default)]
    pub sentences: Vec<String>,
}

impl VocabularyRequest {
    pub fn new(words: WordList, grammar: Vec<String>, sentences: Vec<String>) -> Self {
        Self {
            words,
            grammar,
            sentences,
        }
    }
}

/// Where a referenced token came from. Indices are 1-based, matching the
/// `<cmdN>` numbering of the grammar file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EntryOrigin {
    GrammarRule { index: usize, text: String },
    Sentence { index: usize, text: String },
}

impl EntryOrigin {
    /// Name of the request collection the entry belongs to.
    pub fn collection(&self) -> &'static str {
        match self {
            EntryOrigin::GrammarRule { .. } => "grammar",
            EntryOrigin::Sentence { .. } => "sentences",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            EntryOrigin::GrammarRule { index, .. } | EntryOrigin::Sentence { index, .. } => *index,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            EntryOrigin::GrammarRule { text, .. } | EntryOrigin::Sentence { text, .. } => text,
        }
    }
}

impl fmt::Display for EntryOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryOrigin::GrammarRule { index, text } => write!(f, "grammar rule #{index} ({text:?})"),
            EntryOrigin::Sentence { index, text } => write!(f, "sentence #{index} ({text:?})"),
        }
    }
}
