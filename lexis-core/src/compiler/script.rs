//! `ScriptCompiler` — copy-then-run wrapper around the external compiler script.
//!
//! ```text
//! cp <script> <work_dir>/ && cd <work_dir> && bash <script name>
//! ```
//!
//! The call blocks until the script exits; there is no timeout. Script
//! output is captured and forwarded to `tracing`: at `info` when the script
//! is the verbose variant, at `debug` otherwise.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::{debug, info, warn};

use super::{model_path_for, CompileMode, LanguageModelCompiler, ModelFormat};
use crate::error::{LexisError, Result};

/// Lines of stderr kept in a strict-mode error.
const STDERR_TAIL_LINES: usize = 20;

#[derive(Debug, Clone)]
pub struct ScriptCompiler {
    script: PathBuf,
    format: ModelFormat,
    mode: CompileMode,
    verbose: bool,
    shell: PathBuf,
}

impl ScriptCompiler {
    pub fn new(script: impl Into<PathBuf>, format: ModelFormat, mode: CompileMode) -> Self {
        Self {
            script: script.into(),
            format,
            mode,
            verbose: false,
            shell: PathBuf::from("bash"),
        }
    }

    /// Log script output at `info` instead of `debug`.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Interpreter used to run the script. Default: `bash` from `PATH`.
    pub fn with_shell(mut self, shell: impl Into<PathBuf>) -> Self {
        self.shell = shell.into();
        self
    }

    pub fn script(&self) -> &Path {
        &self.script
    }

    pub fn mode(&self) -> CompileMode {
        self.mode
    }

    fn failure(&self, detail: impl Into<String>) -> LexisError {
        LexisError::Compile {
            script: self.script.clone(),
            detail: detail.into(),
        }
    }

    fn run(&self, work_dir: &Path) -> Result<()> {
        let file_name = self
            .script
            .file_name()
            .ok_or_else(|| self.failure("script path has no file name"))?;

        let local = work_dir.join(file_name);
        // Copying a file onto itself would truncate it.
        let already_local = fs::canonicalize(&self.script)
            .ok()
            .zip(fs::canonicalize(&local).ok())
            .is_some_and(|(src, dst)| src == dst);
        if !already_local {
            fs::copy(&self.script, &local).map_err(|e| {
                self.failure(format!("cannot copy into {}: {e}", work_dir.display()))
            })?;
        }

        let output = Command::new(&self.shell)
            .arg(file_name)
            .current_dir(work_dir)
            .output()
            .map_err(|e| {
                self.failure(format!("cannot start {}: {e}", self.shell.display()))
            })?;

        self.forward_output(&output);

        if output.status.success() {
            Ok(())
        } else {
            Err(self.failure(format!(
                "exited with {}; stderr: {}",
                output.status,
                stderr_tail(&output.stderr)
            )))
        }
    }

    fn forward_output(&self, output: &Output) {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stdout.lines().chain(stderr.lines()) {
            if self.verbose {
                info!(target: "lexis_core::compiler::output", "{line}");
            } else {
                debug!(target: "lexis_core::compiler::output", "{line}");
            }
        }
    }
}

impl LanguageModelCompiler for ScriptCompiler {
    fn compile(&self, corpus: &Path) -> Result<PathBuf> {
        let work_dir = corpus.parent().unwrap_or_else(|| Path::new("."));
        let model = model_path_for(corpus, self.format);

        info!(script = %self.script.display(), "creating language model files");
        match self.run(work_dir) {
            Ok(()) => debug!(model = %model.display(), "language model compiler finished"),
            Err(e) if self.mode == CompileMode::Legacy => {
                warn!("ignoring language model compiler failure: {e}");
            }
            Err(e) => return Err(e),
        }
        Ok(model)
    }
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    let tail = lines[start..].join("\n");
    if tail.is_empty() {
        "<empty>".into()
    } else {
        tail
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).expect("write script");
        path
    }

    fn corpus_in(dir: &Path) -> PathBuf {
        let corpus = dir.join("sentences.txt");
        fs::write(&corpus, "<s> yes </s>\n").expect("write corpus");
        corpus
    }

    #[test]
    fn copies_script_and_runs_inside_work_dir() {
        let scripts = TempDir::new().expect("tempdir");
        let work = TempDir::new().expect("tempdir");
        let run = script(
            scripts.path(),
            "run.sh",
            "cp sentences.txt sentences.lm.bin\n",
        );
        let compiler = ScriptCompiler::new(&run, ModelFormat::Bin, CompileMode::Strict);

        let model = compiler.compile(&corpus_in(work.path())).expect("compile");

        assert_eq!(model, work.path().join("sentences.lm.bin"));
        assert!(work.path().join("run.sh").is_file(), "script copied");
        assert_eq!(
            fs::read_to_string(&model).expect("model written by script"),
            "<s> yes </s>\n"
        );
    }

    #[test]
    fn strict_mode_reports_non_zero_exit() {
        let scripts = TempDir::new().expect("tempdir");
        let work = TempDir::new().expect("tempdir");
        let run = script(scripts.path(), "run.sh", "echo broken corpus >&2\nexit 3\n");
        let compiler = ScriptCompiler::new(&run, ModelFormat::Bin, CompileMode::Strict);

        let err = compiler.compile(&corpus_in(work.path())).expect_err("exit 3");
        match err {
            LexisError::Compile { script, detail } => {
                assert_eq!(script, run);
                assert!(detail.contains("broken corpus"), "{detail}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn legacy_mode_returns_conventional_path_on_failure() {
        let scripts = TempDir::new().expect("tempdir");
        let work = TempDir::new().expect("tempdir");
        let run = script(scripts.path(), "run_silent.sh", "exit 1\n");
        let compiler = ScriptCompiler::new(&run, ModelFormat::Dmp, CompileMode::Legacy);

        let model = compiler.compile(&corpus_in(work.path())).expect("legacy ignores exit");
        assert_eq!(model, work.path().join("sentences.lm.dmp"));
        assert!(!model.exists());
    }

    #[test]
    fn missing_script_is_ignored_in_legacy_and_fatal_in_strict() {
        let work = TempDir::new().expect("tempdir");
        let corpus = corpus_in(work.path());
        let missing = work.path().join("nope").join("run.sh");

        let legacy = ScriptCompiler::new(&missing, ModelFormat::Bin, CompileMode::Legacy);
        assert!(legacy.compile(&corpus).is_ok());

        let strict = ScriptCompiler::new(&missing, ModelFormat::Bin, CompileMode::Strict);
        assert!(matches!(
            strict.compile(&corpus),
            Err(LexisError::Compile { .. })
        ));
    }

    #[test]
    fn missing_shell_is_a_strict_failure() {
        let scripts = TempDir::new().expect("tempdir");
        let work = TempDir::new().expect("tempdir");
        let run = script(scripts.path(), "run.sh", "true\n");
        let compiler = ScriptCompiler::new(&run, ModelFormat::Bin, CompileMode::Strict)
            .with_shell(scripts.path().join("no-such-shell"));

        let err = compiler.compile(&corpus_in(work.path())).expect_err("no shell");
        assert!(err.to_string().contains("cannot start"), "{err}");
    }

    #[test]
    fn stderr_tail_keeps_last_lines() {
        let noisy: String = (0..30).map(|i| format!("line {i}\n")).collect();
        let tail = stderr_tail(noisy.as_bytes());
        assert!(tail.starts_with("line 10"));
        assert!(tail.ends_with("line 29"));
        assert_eq!(stderr_tail(b""), "<empty>");
    }
}
