//! Config, sources and build shared by every subcommand.

use clap::{Arg, ArgAction, ArgMatches};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokensmith_babel::FormatError;
use tokensmith_config::{ConfigError, Loader, TokensmithConfig, PROJECT_FILE};
use tokensmith_core::{build, load_flat_feed, BuildError, LoadError, TokenBuild, TokenLoader, TokenRecord};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Flags accepted by every subcommand that builds tokens.
pub fn source_args() -> Vec<Arg> {
    vec![
        Arg::new("config")
            .long("config")
            .short('c')
            .value_name("FILE")
            .help("Configuration file layered over tokensmith.toml and the defaults"),
        Arg::new("source")
            .long("source")
            .short('s')
            .value_name("GLOB")
            .action(ArgAction::Append)
            .help("Token source pattern, replaces source.patterns (repeatable)"),
        Arg::new("lenient")
            .long("lenient")
            .action(ArgAction::SetTrue)
            .help("Skip malformed or conflicting tokens instead of failing"),
        Arg::new("allow-collisions")
            .long("allow-collisions")
            .action(ArgAction::SetTrue)
            .help("Let a later token overwrite an earlier one at the same key"),
    ]
}

/// Builds the layered configuration: defaults, `tokensmith.toml`, `--config`, then flags.
pub fn load_config(matches: &ArgMatches) -> Result<TokensmithConfig, CliError> {
    let mut loader = Loader::new().with_optional_file(PROJECT_FILE);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(patterns) = matches.get_many::<String>("source") {
        loader = loader.set_override("source.patterns", patterns.cloned().collect::<Vec<_>>())?;
    }
    if matches.get_flag("lenient") {
        loader = loader.set_override("build.strictness", "lenient")?;
    }
    if matches.get_flag("allow-collisions") {
        loader = loader.set_override("build.collisions", "warn")?;
    }
    if let Ok(Some(out_dir)) = matches.try_get_one::<String>("out-dir") {
        loader = loader.set_override("build.out_dir", out_dir.as_str())?;
    }
    Ok(loader.build()?)
}

/// Records from a flat JSON feed when `feed` is given, else from the configured sources.
pub fn load_records(
    config: &TokensmithConfig,
    feed: Option<&Path>,
) -> Result<Vec<TokenRecord>, CliError> {
    match feed {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| CliError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(load_flat_feed(&text)?)
        }
        None => Ok(TokenLoader::new(config.source.patterns.iter().cloned()).load()?),
    }
}

pub fn build_tokens(
    config: &TokensmithConfig,
    feed: Option<&Path>,
) -> Result<TokenBuild, CliError> {
    let records = load_records(config, feed)?;
    Ok(build(records, &config.build_options())?)
}
