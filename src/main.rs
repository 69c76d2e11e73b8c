//! # rulecheck CLI Entry Point
//!
//! Parses arguments, resolves the profile, runs validation and maps the
//! report's outcome to the process exit code.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use rulecheck::{OsFiles, ValidatorConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Validate YAML/JSON rule files.
///
/// With no PATHS, the selected profile's default glob patterns are searched
/// under the root directory.
#[derive(Parser, Debug)]
#[command(name = "rulecheck", version, about)]
struct Cli {
    /// Files or glob patterns, relative to the root.
    paths: Vec<String>,

    /// Validation profile.
    #[arg(long, value_enum, env = "RULECHECK_PROFILE")]
    profile: Option<ProfileArg>,

    /// Directory that paths and patterns are resolved against [default: .]
    #[arg(long, env = "RULECHECK_ROOT")]
    root: Option<PathBuf>,

    /// TOML configuration file.
    #[arg(long, env = "RULECHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProfileArg {
    /// Rule files of any layout; per-rule id, label and conditions.
    Ruleset,
    /// A single `{name, version, rules}` document with strict rules.
    Versioned,
}

impl ProfileArg {
    fn as_str(self) -> &'static str {
        match self {
            ProfileArg::Ruleset => rulecheck::profile::RULESET,
            ProfileArg::Versioned => rulecheck::profile::VERSIONED,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => ValidatorConfig::load(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => ValidatorConfig::default(),
    };
    let profile = config.profile(cli.profile.map(ProfileArg::as_str))?;

    let root = cli
        .root
        .or_else(|| config.root.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let source = OsFiles::new(root);
    tracing::debug!(
        profile = %profile.name,
        root = %source.root().display(),
        "starting validation"
    );

    let report = rulecheck::validate_paths(&source, &cli.paths, &profile)
        .with_context(|| format!("file discovery failed under {}", source.root().display()))?;

    match cli.format {
        OutputFormat::Text => print!("{}", report),
        OutputFormat::Json => println!("{}", rulecheck::to_json(&report)?),
    }

    Ok(ExitCode::from(report.exit_code(&profile.exit_codes)))
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
