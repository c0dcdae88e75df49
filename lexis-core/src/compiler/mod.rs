//! Language-model compiler abstraction.
//!
//! The `LanguageModelCompiler` trait decouples the pipeline from the external
//! tool that turns `sentences.txt` into a statistical language model. The
//! pipeline only asks for a compile and records the returned path; it never
//! reads the model back.
//!
//! Implementations:
//! - `ScriptCompiler` copies a shell script into the working directory and
//!   runs it there.
//! - `StubCompiler` runs nothing and records what it was asked to compile.

pub mod script;
pub mod stub;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Stem of every compiled model file (`sentences.lm.<ext>`).
pub const MODEL_STEM: &str = "sentences.lm";

/// Extension of the compiled model, which the external tool picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModelFormat {
    /// `sentences.lm.bin`
    Bin,
    /// `sentences.lm.dmp`
    Dmp,
}

impl ModelFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ModelFormat::Bin => "bin",
            ModelFormat::Dmp => "dmp",
        }
    }

    pub fn file_name(self) -> String {
        format!("{MODEL_STEM}.{}", self.extension())
    }
}

/// Expected model location for a corpus, by naming convention only.
pub fn model_path_for(corpus: &Path, format: ModelFormat) -> PathBuf {
    corpus.with_file_name(format.file_name())
}

/// How compiler failures are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompileMode {
    /// Failures are logged and ignored; the conventional path is returned.
    #[default]
    Legacy,
    /// Copy failures, spawn failures and non-zero exits are errors.
    Strict,
}

/// Contract for language-model compilers.
pub trait LanguageModelCompiler: Send + Sync + 'static {
    /// Compile the corpus at `corpus` and return the model path.
    ///
    /// The corpus' parent directory is the working directory of the run.
    ///
    /// # Errors
    /// Implementation specific; `ScriptCompiler` only fails in
    /// `CompileMode::Strict`.
    fn compile(&self, corpus: &Path) -> Result<PathBuf>;
}

impl<C: LanguageModelCompiler> LanguageModelCompiler for Arc<C> {
    fn compile(&self, corpus: &Path) -> Result<PathBuf> {
        (**self).compile(corpus)
    }
}

/// Shared handle to any `LanguageModelCompiler`.
#[derive(Clone)]
pub struct CompilerHandle(pub Arc<dyn LanguageModelCompiler>);

impl CompilerHandle {
    pub fn new<C: LanguageModelCompiler>(compiler: C) -> Self {
        Self(Arc::new(compiler))
    }

    pub fn compile(&self, corpus: &Path) -> Result<PathBuf> {
        self.0.compile(corpus)
    }
}

impl std::fmt::Debug for CompilerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompilerHandle").finish_non_exhaustive()
    }
}
