//! Command-line parsing.

use std::path::PathBuf;

pub const USAGE: &str = "Usage: lexis --request <file.json> [--settings <file.json>] \
[--work-dir <dir>] [--dry-run] [--strict] [--compiler-output] [--verbose]
       lexis --print-default-settings";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Generate { request: PathBuf },
    PrintDefaultSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub command: Command,
    pub settings: Option<PathBuf>,
    pub work_dir: Option<PathBuf>,
    pub dry_run: bool,
    pub strict: bool,
    pub compiler_output: bool,
    pub verbose: bool,
}

pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Args, String> {
    let mut request: Option<PathBuf> = None;
    let mut print_defaults = false;
    let mut settings: Option<PathBuf> = None;
    let mut work_dir: Option<PathBuf> = None;
    let mut dry_run = false;
    let mut strict = false;
    let mut compiler_output = false;
    let mut verbose = false;

    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--request" | "-r" => {
                let Some(v) = it.next() else {
                    return Err("missing value for --request".into());
                };
                request = Some(PathBuf::from(v));
            }
            "--settings" => {
                let Some(v) = it.next() else {
                    return Err("missing value for --settings".into());
                };
                settings = Some(PathBuf::from(v));
            }
            "--work-dir" => {
                let Some(v) = it.next() else {
                    return Err("missing value for --work-dir".into());
                };
                work_dir = Some(PathBuf::from(v));
            }
            "--dry-run" => dry_run = true,
            "--strict" => strict = true,
            "--compiler-output" => compiler_output = true,
            "--verbose" | "-v" => verbose = true,
            "--print-default-settings" => print_defaults = true,
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    let command = match (print_defaults, request) {
        (true, _) => Command::PrintDefaultSettings,
        (false, Some(request)) => Command::Generate { request },
        (false, None) => return Err("--request is required".into()),
    };

    Ok(Args {
        command,
        settings,
        work_dir,
        dry_run,
        strict,
        compiler_output,
        verbose,
    })
}
