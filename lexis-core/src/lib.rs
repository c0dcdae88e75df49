//! # lexis-core
//!
//! Limited-vocabulary configuration generator for a grammar/language-model
//! speech recognizer.
//!
//! ## Architecture
//!
//! ```text
//! VocabularyRequest { words, grammar, sentences }
//!         │
//!   vocabulary::validate        (every referenced token must be a word)
//!         │
//!   emit::emit                  → custom.dict, <grammar>.gram, sentences.txt
//!         │
//!   LanguageModelCompiler       → sentences.lm.<ext>
//!         │
//!   ConfigurationBundle         (paths + grammar_disabled, handed to the engine)
//! ```
//!
//! Everything is synchronous and runs on the caller's thread. One
//! `VocabularyConfigurator` can serve many callers as long as each uses its
//! own working directory.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod bundle;
pub mod compiler;
pub mod config;
pub mod emit;
pub mod engine;
pub mod error;
pub mod vocabulary;

// Convenience re-exports for downstream crates
pub use bundle::{ConfigurationBundle, GrammarDisabledPolicy};
pub use compiler::{
    script::ScriptCompiler, stub::StubCompiler, CompileMode, CompilerHandle,
    LanguageModelCompiler, ModelFormat,
};
pub use config::{EmitPolicies, EngineLayout, GeneratorConfig, VariantProfile};
pub use emit::{Artifact, ArtifactSet};
pub use engine::{Generation, ValidationTiming, VocabularyConfigurator};
pub use error::LexisError;
pub use vocabulary::{EntryOrigin, VocabularyRequest, WordEntry, WordList};
