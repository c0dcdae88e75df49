//! Language-model training corpus: `<s> TEXT </s>\n` per sentence.
//!
//! Without example sentences every word becomes its own one-token sentence,
//! so the corpus is never empty for a non-empty word list.

use crate::vocabulary::WordList;

/// Rendered corpus text plus whether the word-list fallback was used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    pub text: String,
    pub from_words: bool,
}

pub fn render_corpus(words: &WordList, sentences: &[String]) -> Corpus {
    let mut text = String::new();
    if sentences.is_empty() {
        for token in words.tokens() {
            push_line(&mut text, token);
        }
        return Corpus {
            text,
            from_words: true,
        };
    }
    for sentence in sentences {
        push_line(&mut text, sentence);
    }
    Corpus {
        text,
        from_words: false,
    }
}

fn push_line(out: &mut String, body: &str) {
    out.push_str("<s> ");
    out.push_str(body);
    out.push_str(" </s>\n");
}
