//! Pronunciation dictionary: `TOKEN PH1 PH2 ...\n`, one word per line.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::vocabulary::WordList;

/// How phoneme symbols are written into the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PhonemePolicy {
    /// Write phonemes exactly as given.
    Verbatim,
    /// Remove `-` and `_` from every phoneme (`"a_1"` → `"a1"`).
    StripSeparators,
}

impl PhonemePolicy {
    pub fn apply<'a>(self, phoneme: &'a str) -> Cow<'a, str> {
        match self {
            PhonemePolicy::Verbatim => Cow::Borrowed(phoneme),
            PhonemePolicy::StripSeparators if phoneme.contains(['-', '_']) => {
                Cow::Owned(phoneme.chars().filter(|c| !matches!(c, '-' | '_')).collect())
            }
            PhonemePolicy::StripSeparators => Cow::Borrowed(phoneme),
        }
    }
}

pub fn render_dictionary(words: &WordList, policy: PhonemePolicy) -> String {
    let mut out = String::new();
    for entry in words {
        out.push_str(&entry.token);
        for phoneme in &entry.phonemes {
            out.push(' ');
            out.push_str(&policy.apply(phoneme));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_line_per_word_in_input_order() {
        let words = WordList::from_pairs([("yes", vec!["Y", "EH", "S"]), ("no", vec!["N", "OW"])])
            .expect("build list");
        assert_eq!(
            render_dictionary(&words, PhonemePolicy::Verbatim),
            "yes Y EH S\nno N OW\n"
        );
    }

    #[test]
    fn strip_separators_removes_dash_and_underscore() {
        let words =
            WordList::from_pairs([("kalimera", vec!["k", "a_1", "l-i", "m__e", "r", "a"])])
                .expect("build list");
        assert_eq!(
            render_dictionary(&words, PhonemePolicy::StripSeparators),
            "kalimera k a1 li me r a\n"
        );
        assert_eq!(
            render_dictionary(&words, PhonemePolicy::Verbatim),
            "kalimera k a_1 l-i m__e r a\n"
        );
    }

    #[test]
    fn word_without_phonemes_is_bare_token() {
        let words = WordList::from_pairs([("hm", Vec::<String>::new())]).expect("build list");
        assert_eq!(render_dictionary(&words, PhonemePolicy::Verbatim), "hm\n");
    }

    #[test]
    fn empty_word_list_renders_empty_file() {
        assert_eq!(render_dictionary(&WordList::new(), PhonemePolicy::Verbatim), "");
    }
}
