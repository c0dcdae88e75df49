//! `StubCompiler` — placeholder backend that compiles nothing.
//!
//! Returns the conventional model path and remembers every corpus it was
//! handed, so dry runs and tests can exercise the whole pipeline without the
//! external toolchain.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::debug;

use super::{model_path_for, LanguageModelCompiler, ModelFormat};
use crate::error::Result;

#[derive(Debug)]
pub struct StubCompiler {
    format: ModelFormat,
    calls: Mutex<Vec<PathBuf>>,
}

impl StubCompiler {
    pub fn new(format: ModelFormat) -> Self {
        Self {
            format,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Corpus paths passed to `compile`, oldest first.
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().clone()
    }
}

impl Default for StubCompiler {
    fn default() -> Self {
        Self::new(ModelFormat::Bin)
    }
}

impl LanguageModelCompiler for StubCompiler {
    fn compile(&self, corpus: &Path) -> Result<PathBuf> {
        debug!(corpus = %corpus.display(), "StubCompiler::compile — no-op");
        self.calls.lock().push(corpus.to_path_buf());
        Ok(model_path_for(corpus, self.format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_calls_and_returns_conventional_path() {
        let stub = StubCompiler::new(ModelFormat::Dmp);
        let model = stub
            .compile(Path::new("/tmp/pack/sentences.txt"))
            .expect("stub never fails");
        assert_eq!(model, PathBuf::from("/tmp/pack/sentences.lm.dmp"));
        assert_eq!(stub.calls(), vec![PathBuf::from("/tmp/pack/sentences.txt")]);
    }
}
