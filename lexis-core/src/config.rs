//! Generator configuration (JSON file + `LEXIS_*` environment overrides).
//!
//! Built once at process start and handed to `VocabularyConfigurator::new`;
//! nothing in the pipeline reads global state.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::bundle::GrammarDisabledPolicy;
use crate::compiler::{CompileMode, ModelFormat};
use crate::emit::{PhonemePolicy, RuleQuoting};
use crate::engine::ValidationTiming;
use crate::error::{LexisError, Result};

const DEFAULT_GRAMMAR_NAME: &str = "custom";
const DEFAULT_JAR_FILE: &str = "sphinx4-core-1.0-SNAPSHOT.jar";
const DEFAULT_LANGUAGE_PACK: &str = "greekPack";
const WORK_DIR_NAME: &str = "tmp_language_pack";
const BASE_CONFIG_FILE: &str = "default.config.xml";
const COMPILER_SCRIPT: &str = "run.sh";
const SILENT_COMPILER_SCRIPT: &str = "run_silent.sh";

/// Installation roots of the recognition engine, as returned by the path
/// lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct EngineLayout {
    pub jars_dir: PathBuf,
    pub jar_file: String,
    /// Engine wrapper package; its `src` directory joins the class path.
    pub wrapper_dir: PathBuf,
    pub language_models_dir: PathBuf,
    /// Language pack under `language_models_dir` holding the base
    /// configuration and the compiler scripts.
    pub language_pack: String,
    pub acoustic_model_dir: PathBuf,
}

impl Default for EngineLayout {
    fn default() -> Self {
        Self {
            jars_dir: PathBuf::from("/opt/sphinx4"),
            jar_file: DEFAULT_JAR_FILE.into(),
            wrapper_dir: PathBuf::from("/opt/sphinx4/wrapper"),
            language_models_dir: PathBuf::from("/opt/sphinx4/language_models"),
            language_pack: DEFAULT_LANGUAGE_PACK.into(),
            acoustic_model_dir: PathBuf::from("/opt/sphinx4/acoustic_model"),
        }
    }
}

impl EngineLayout {
    /// `.:<jars_dir>/<jar_file>:<wrapper_dir>/src`
    pub fn class_path(&self) -> String {
        format!(
            ".:{}:{}",
            self.jars_dir.join(&self.jar_file).display(),
            self.wrapper_dir.join("src").display()
        )
    }

    pub fn base_configuration(&self) -> PathBuf {
        self.pack_dir().join(BASE_CONFIG_FILE)
    }

    pub fn default_work_dir(&self) -> PathBuf {
        self.language_models_dir.join(WORK_DIR_NAME)
    }

    /// `run.sh` when compiler output is wanted, `run_silent.sh` otherwise.
    pub fn compiler_script(&self, verbose: bool) -> PathBuf {
        let name = if verbose {
            COMPILER_SCRIPT
        } else {
            SILENT_COMPILER_SCRIPT
        };
        self.pack_dir().join(name)
    }

    fn pack_dir(&self) -> PathBuf {
        self.language_models_dir.join(&self.language_pack)
    }

    fn normalize(&mut self) {
        self.jar_file = non_blank_or(&self.jar_file, DEFAULT_JAR_FILE);
        self.language_pack = non_blank_or(&self.language_pack, DEFAULT_LANGUAGE_PACK);
    }
}

/// Named presets of emitter policies. The two presets are the two emitter
/// generations the recognition engine has been fed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VariantProfile {
    /// Separator-free phonemes, quoted rules, `.bin` model, grammar disabled
    /// when there are no rules.
    #[default]
    Standard,
    /// Verbatim phonemes, bare rules, `.dmp` model, inverted
    /// `grammar_disabled`.
    Classic,
}

impl VariantProfile {
    pub fn policies(self) -> EmitPolicies {
        match self {
            VariantProfile::Standard => EmitPolicies {
                phonemes: PhonemePolicy::StripSeparators,
                quoting: RuleQuoting::Quoted,
                model_format: ModelFormat::Bin,
                grammar_disabled: GrammarDisabledPolicy::WhenEmpty,
            },
            VariantProfile::Classic => EmitPolicies {
                phonemes: PhonemePolicy::Verbatim,
                quoting: RuleQuoting::Bare,
                model_format: ModelFormat::Dmp,
                grammar_disabled: GrammarDisabledPolicy::WhenNonEmpty,
            },
        }
    }
}

/// Fully resolved output policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmitPolicies {
    pub phonemes: PhonemePolicy,
    pub quoting: RuleQuoting,
    pub model_format: ModelFormat,
    pub grammar_disabled: GrammarDisabledPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct GeneratorConfig {
    pub layout: EngineLayout,
    /// Working directory for artifacts. `None` uses the layout default.
    pub work_dir: Option<PathBuf>,
    pub grammar_name: String,
    pub variant: VariantProfile,
    pub phoneme_policy: Option<PhonemePolicy>,
    pub rule_quoting: Option<RuleQuoting>,
    pub model_format: Option<ModelFormat>,
    pub grammar_disabled_policy: Option<GrammarDisabledPolicy>,
    pub validation_timing: ValidationTiming,
    pub compile_mode: CompileMode,
    /// Run the verbose compiler script and log its output at `info`.
    pub allow_compiler_output: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            layout: EngineLayout::default(),
            work_dir: None,
            grammar_name: DEFAULT_GRAMMAR_NAME.into(),
            variant: VariantProfile::Standard,
            phoneme_policy: None,
            rule_quoting: None,
            model_format: None,
            grammar_disabled_policy: None,
            validation_timing: ValidationTiming::Upfront,
            compile_mode: CompileMode::Legacy,
            allow_compiler_output: false,
        }
    }
}

impl GeneratorConfig {
    pub fn normalize(&mut self) {
        self.layout.normalize();
        self.grammar_name = normalize_grammar_name(&self.grammar_name);
        self.work_dir = self
            .work_dir
            .take()
            .filter(|d| !d.as_os_str().is_empty());
    }

    /// Variant preset with per-policy overrides folded in.
    pub fn resolve_policies(&self) -> EmitPolicies {
        let base = self.variant.policies();
        EmitPolicies {
            phonemes: self.phoneme_policy.unwrap_or(base.phonemes),
            quoting: self.rule_quoting.unwrap_or(base.quoting),
            model_format: self.model_format.unwrap_or(base.model_format),
            grammar_disabled: self.grammar_disabled_policy.unwrap_or(base.grammar_disabled),
        }
    }

    pub fn work_dir(&self) -> PathBuf {
        self.work_dir
            .clone()
            .unwrap_or_else(|| self.layout.default_work_dir())
    }

    pub fn compiler_script(&self) -> PathBuf {
        self.layout.compiler_script(self.allow_compiler_output)
    }

    /// Apply `LEXIS_*` variables from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup. Unparseable values are logged
    /// and skipped.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = lookup("LEXIS_VARIANT") {
            match parse_variant(&raw) {
                Some(v) => self.variant = v,
                None => warn!("ignoring LEXIS_VARIANT={raw:?}"),
            }
        }
        if let Some(raw) = lookup("LEXIS_COMPILE_MODE") {
            match parse_compile_mode(&raw) {
                Some(m) => self.compile_mode = m,
                None => warn!("ignoring LEXIS_COMPILE_MODE={raw:?}"),
            }
        }
        if let Some(raw) = lookup("LEXIS_COMPILER_OUTPUT") {
            match parse_flag(&raw) {
                Some(f) => self.allow_compiler_output = f,
                None => warn!("ignoring LEXIS_COMPILER_OUTPUT={raw:?}"),
            }
        }
        if let Some(raw) = lookup("LEXIS_WORK_DIR") {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                self.work_dir = Some(PathBuf::from(trimmed));
            }
        }
    }
}

pub fn parse_variant(raw: &str) -> Option<VariantProfile> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "standard" | "default" => Some(VariantProfile::Standard),
        "classic" | "legacy" => Some(VariantProfile::Classic),
        _ => None,
    }
}

pub fn parse_compile_mode(raw: &str) -> Option<CompileMode> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "legacy" | "lenient" => Some(CompileMode::Legacy),
        "strict" => Some(CompileMode::Strict),
        _ => None,
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// JSGF grammar names are identifiers; anything else falls back to `custom`.
/// The name doubles as the `.gram` file stem, so it never contains a path
/// separator and never starts with `.`.
pub fn normalize_grammar_name(raw: &str) -> String {
    let name = raw.trim();
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));
    if valid {
        name.into()
    } else {
        DEFAULT_GRAMMAR_NAME.into()
    }
}

fn non_blank_or(raw: &str, fallback: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        fallback.into()
    } else {
        trimmed.into()
    }
}

pub fn default_config_path() -> PathBuf {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("/tmp"))
                .join(".config")
        })
        .join("lexis")
        .join("settings.json")
}

/// Read a settings file. A missing file yields defaults.
///
/// # Errors
/// - `LexisError::Io` if the file exists but cannot be read.
/// - `LexisError::Settings` if it is not valid settings JSON.
pub fn load_config(path: &Path) -> Result<GeneratorConfig> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("settings file {} not found, using defaults", path.display());
            return Ok(GeneratorConfig::default());
        }
        Err(e) => return Err(e.into()),
    };
    let mut config: GeneratorConfig = serde_json::from_str(&raw)
        .map_err(|e| LexisError::Settings(format!("{}: {e}", path.display())))?;
    config.normalize();
    Ok(config)
}

pub fn save_config(path: &Path, config: &GeneratorConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config).map_err(std::io::Error::other)?;
    fs::write(path, json)?;
    Ok(())
}
