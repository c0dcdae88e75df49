//! `lexis`: generate a limited-vocabulary recognizer configuration.
//!
//! Reads a request document (`{"words": {...}, "grammar": [...], "sentences": [...]}`),
//! writes the dictionary, grammar and corpus into the working directory,
//! triggers the language-model compiler and prints the configuration bundle
//! as JSON on stdout. Logs go to stderr.

mod args;

use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};
use lexis_core::{
    config::{default_config_path, load_config},
    CompileMode, CompilerHandle, GeneratorConfig, StubCompiler, VocabularyConfigurator,
    VocabularyRequest,
};
use tracing::info;

use args::{Args, Command};

fn main() -> ExitCode {
    let args = match args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("lexis: {e}\n\n{}", args::USAGE);
            return ExitCode::from(2);
        }
    };

    let default_filter = if args.verbose {
        "lexis=debug"
    } else {
        "lexis=info"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("lexis: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let request_path = match args.command {
        Command::PrintDefaultSettings => {
            println!("{}", serde_json::to_string_pretty(&GeneratorConfig::default())?);
            return Ok(());
        }
        Command::Generate { ref request } => request.clone(),
    };
    let config = resolve_config(&args)?;

    let raw = fs::read_to_string(&request_path)
        .with_context(|| format!("cannot read request {}", request_path.display()))?;
    let request: VocabularyRequest = serde_json::from_str(&raw)
        .with_context(|| format!("invalid request document {}", request_path.display()))?;

    let configurator = if args.dry_run {
        info!("dry run, language model compiler disabled");
        let format = config.resolve_policies().model_format;
        VocabularyConfigurator::new(config, CompilerHandle::new(StubCompiler::new(format)))
    } else {
        VocabularyConfigurator::with_script_compiler(config)
    };

    let bundle = configurator.configure_default(&request)?;
    println!("{}", serde_json::to_string_pretty(&bundle)?);
    Ok(())
}

/// Settings file, then `LEXIS_*` environment, then command-line flags.
fn resolve_config(args: &Args) -> Result<GeneratorConfig> {
    let settings_path = args.settings.clone().unwrap_or_else(default_config_path);
    let mut config = load_config(&settings_path)
        .with_context(|| format!("cannot load settings {}", settings_path.display()))?;
    config.apply_env_overrides();

    if let Some(dir) = &args.work_dir {
        config.work_dir = Some(dir.clone());
    }
    if args.strict {
        config.compile_mode = CompileMode::Strict;
    }
    if args.compiler_output {
        config.allow_compiler_output = true;
    }
    config.normalize();
    Ok(config)
}
