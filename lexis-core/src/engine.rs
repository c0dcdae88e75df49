//! `VocabularyConfigurator` — runs the validate → emit → compile pipeline.
//!
//! ## Flow
//!
//! ```text
//! configure(request, dir)
//!     └─► validate()        (Upfront timing only)
//!         └─► emit()        → custom.dict, <name>.gram, sentences.txt
//!             └─► compile() → sentences.lm.<ext>
//!                 └─► ConfigurationBundle
//! ```
//!
//! Each call is independent and blocking. Callers running requests in
//! parallel must give each request its own directory: two runs sharing a
//! directory race on the artifacts and on the compiler script.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use crate::{
    bundle::ConfigurationBundle,
    compiler::{script::ScriptCompiler, CompilerHandle},
    config::{EmitPolicies, GeneratorConfig},
    emit::{self, ArtifactSet},
    error::Result,
    vocabulary::{self, VocabularyRequest},
};

/// When referential integrity is checked relative to the file writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationTiming {
    /// Everything is checked before the first file is written.
    #[default]
    Upfront,
    /// Rules are checked while the grammar is produced, sentences while the
    /// corpus is produced. Files written before a failure stay on disk.
    Interleaved,
}

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub bundle: ConfigurationBundle,
    pub artifacts: ArtifactSet,
}

/// The pipeline entry point. `Send + Sync`; share it behind an `Arc` or a
/// reference.
#[derive(Debug, Clone)]
pub struct VocabularyConfigurator {
    config: GeneratorConfig,
    policies: EmitPolicies,
    compiler: CompilerHandle,
}

impl VocabularyConfigurator {
    /// `config` is normalized first, so a grammar name that is not a plain
    /// identifier falls back to `custom` here too.
    pub fn new(mut config: GeneratorConfig, compiler: CompilerHandle) -> Self {
        config.normalize();
        let policies = config.resolve_policies();
        Self {
            config,
            policies,
            compiler,
        }
    }

    /// Build a configurator that runs the layout's compiler script.
    pub fn with_script_compiler(mut config: GeneratorConfig) -> Self {
        config.normalize();
        let policies = config.resolve_policies();
        let compiler = ScriptCompiler::new(
            config.compiler_script(),
            policies.model_format,
            config.compile_mode,
        )
        .verbose(config.allow_compiler_output);
        Self::new(config, CompilerHandle::new(compiler))
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn policies(&self) -> &EmitPolicies {
        &self.policies
    }

    /// Run the pipeline into the configured working directory.
    pub fn configure_default(&self, request: &VocabularyRequest) -> Result<ConfigurationBundle> {
        self.configure(request, &self.config.work_dir())
    }

    /// Run the pipeline into `target_dir` and return the bundle.
    ///
    /// # Errors
    /// - `LexisError::MissingWord` / `LexisError::BlankEntry` on invalid references,
    ///   `LexisError::EmptyVocabulary` when there is nothing to build a corpus from.
    /// - `LexisError::Io` if the artifacts cannot be written.
    /// - `LexisError::Compile` in strict compile mode.
    pub fn configure(
        &self,
        request: &VocabularyRequest,
        target_dir: &Path,
    ) -> Result<ConfigurationBundle> {
        self.generate(request, target_dir).map(|g| g.bundle)
    }

    /// Like `configure`, also returning what was written.
    pub fn generate(&self, request: &VocabularyRequest, target_dir: &Path) -> Result<Generation> {
        let span = info_span!("configure", dir = %target_dir.display());
        let _enter = span.enter();

        info!(
            words = request.words.len(),
            rules = request.grammar.len(),
            sentences = request.sentences.len(),
            "creating configuration files"
        );
        debug!(words = ?request.words, grammar = ?request.grammar, sentences = ?request.sentences);

        let timing = self.config.validation_timing;
        if timing == ValidationTiming::Upfront {
            vocabulary::validate(&request.words, &request.grammar, &request.sentences)?;
        }

        let artifacts = emit::emit(
            request,
            target_dir,
            &self.config.grammar_name,
            &self.policies,
            timing,
        )?;
        if artifacts.corpus_from_words {
            debug!("no sentences supplied, corpus built from the word list");
        }

        let language_model = self.compiler.compile(&artifacts.corpus.path)?;

        let bundle = ConfigurationBundle {
            jar_path: self.config.layout.class_path(),
            configuration_path: self.config.layout.base_configuration(),
            acoustic_model: self.config.layout.acoustic_model_dir.clone(),
            grammar_name: self.config.grammar_name.clone(),
            grammar_folder: target_dir.to_path_buf(),
            dictionary: artifacts.dictionary.path.clone(),
            language_model,
            grammar_disabled: self
                .policies
                .grammar_disabled
                .grammar_disabled(request.grammar.len()),
        };

        info!(
            grammar_disabled = bundle.grammar_disabled,
            language_model = %bundle.language_model.display(),
            "configuration ready"
        );
        Ok(Generation { bundle, artifacts })
    }
}
