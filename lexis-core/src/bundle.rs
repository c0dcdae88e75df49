//! The configuration bundle handed to the recognition engine.
//!
//! Field names are the engine's own keys and serialize unchanged:
//!
//! ```json
//! {
//!   "jar_path": ".:/opt/sphinx4/sphinx4-core-1.0-SNAPSHOT.jar:/opt/sphinx4/wrapper/src",
//!   "configuration_path": "/opt/sphinx4/language_models/greekPack/default.config.xml",
//!   "acoustic_model": "/opt/sphinx4/acoustic_model",
//!   "grammar_name": "custom",
//!   "grammar_folder": "/opt/sphinx4/language_models/tmp_language_pack",
//!   "dictionary": "/opt/sphinx4/language_models/tmp_language_pack/custom.dict",
//!   "language_model": "/opt/sphinx4/language_models/tmp_language_pack/sentences.lm.bin",
//!   "grammar_disabled": false
//! }
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationBundle {
    /// Class path of the recognition engine.
    pub jar_path: String,
    /// Base engine configuration file.
    pub configuration_path: PathBuf,
    pub acoustic_model: PathBuf,
    pub grammar_name: String,
    /// Directory holding `<grammar_name>.gram`.
    pub grammar_folder: PathBuf,
    pub dictionary: PathBuf,
    /// Expected compiled model path; may not exist if the compiler failed.
    pub language_model: PathBuf,
    /// Recognition should ignore the grammar and rely on the language model.
    pub grammar_disabled: bool,
}

/// How `grammar_disabled` is derived from the rule count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GrammarDisabledPolicy {
    /// Disabled iff there are no rules.
    WhenEmpty,
    /// Disabled iff there are rules. Reproduces the older emitter's flag.
    WhenNonEmpty,
}

impl GrammarDisabledPolicy {
    pub fn grammar_disabled(self, rule_count: usize) -> bool {
        match self {
            GrammarDisabledPolicy::WhenEmpty => rule_count == 0,
            GrammarDisabledPolicy::WhenNonEmpty => rule_count != 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_empty_disables_only_without_rules() {
        assert!(GrammarDisabledPolicy::WhenEmpty.grammar_disabled(0));
        assert!(!GrammarDisabledPolicy::WhenEmpty.grammar_disabled(3));
    }

    #[test]
    fn when_non_empty_is_inverted() {
        assert!(!GrammarDisabledPolicy::WhenNonEmpty.grammar_disabled(0));
        assert!(GrammarDisabledPolicy::WhenNonEmpty.grammar_disabled(1));
    }

    #[test]
    fn bundle_serializes_with_engine_keys() {
        let bundle = ConfigurationBundle {
            jar_path: ".:/a.jar:/w/src".into(),
            configuration_path: "/lm/greekPack/default.config.xml".into(),
            acoustic_model: "/am".into(),
            grammar_name: "custom".into(),
            grammar_folder: "/tmp/pack".into(),
            dictionary: "/tmp/pack/custom.dict".into(),
            language_model: "/tmp/pack/sentences.lm.bin".into(),
            grammar_disabled: true,
        };
        let json = serde_json::to_value(&bundle).expect("serialize bundle");
        assert_eq!(json["jar_path"], ".:/a.jar:/w/src");
        assert_eq!(json["grammar_folder"], "/tmp/pack");
        assert_eq!(json["grammar_disabled"], true);
        assert_eq!(json.as_object().expect("object").len(), 8);
    }
}
