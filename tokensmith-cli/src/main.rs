//! Command-line interface for tokensmith
//! This binary turns design-token sources into platform artifacts: CSS variables, a Tailwind
//! preset, Android resources and Compose objects.
//!
//! Usage:
//!   tokensmith build [--platform `<name>`]... [--out-dir `<dir>`] [--dry-run]   - Write every configured artifact
//!   tokensmith render --format `<format>` [--feed `<file>`] [--type `<tag>`]...    - Print one format to stdout
//!   tokensmith inspect                                                          - Print what the build did with each token
//!   tokensmith formats                                                          - List available formats
//!
//! Configuration is layered: built-in defaults, then `tokensmith.toml` in the working
//! directory, then `--config <file>`, then command-line flags.

mod logging;
mod pipeline;

use clap::{Arg, ArgAction, ArgMatches, Command};
use pipeline::{build_tokens, load_config, source_args, CliError};
use std::path::PathBuf;
use tokensmith_babel::{render_platforms, write_artifacts, FormatOptions, FormatRegistry, RenderContext};

fn cli() -> Command {
    Command::new("tokensmith")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build design tokens into CSS, Tailwind, Android and Compose artifacts")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count)
                .global(true)
                .help("Raise the log level (repeatable); RUST_LOG takes precedence"),
        )
        .subcommand(
            Command::new("build")
                .about("Render every enabled platform and write its files")
                .args(source_args())
                .arg(
                    Arg::new("out-dir")
                        .long("out-dir")
                        .short('o')
                        .value_name("DIR")
                        .help("Directory platform build paths are resolved against"),
                )
                .arg(
                    Arg::new("platform")
                        .long("platform")
                        .short('p')
                        .value_name("NAME")
                        .action(ArgAction::Append)
                        .help("Only build this platform (repeatable)"),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("List the files that would be written without writing them"),
                ),
        )
        .subcommand(
            Command::new("render")
                .about("Render a single format to stdout")
                .args(source_args())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_name("NAME")
                        .required(true)
                        .help("Format name, see `tokensmith formats`"),
                )
                .arg(
                    Arg::new("feed")
                        .long("feed")
                        .value_name("FILE")
                        .help("Read a flat JSON array of {path, type, value} records instead of sources"),
                )
                .args(format_option_args()),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print the build report")
                .args(source_args())
                .arg(
                    Arg::new("feed")
                        .long("feed")
                        .value_name("FILE")
                        .help("Read a flat JSON array of {path, type, value} records instead of sources"),
                ),
        )
        .subcommand(Command::new("formats").about("List available output formats"))
}

/// Per-file format options, for rendering a single format the way a platform file would.
fn format_option_args() -> Vec<Arg> {
    vec![
        Arg::new("selector")
            .long("selector")
            .value_name("SELECTOR")
            .help("Selector wrapping CSS declarations [default: :root]"),
        Arg::new("object-name")
            .long("object-name")
            .value_name("NAME")
            .help("Kotlin object name for compose output [default: Tokens]"),
        Arg::new("package")
            .long("package")
            .value_name("PACKAGE")
            .help("Kotlin package for compose output"),
        Arg::new("type")
            .long("type")
            .short('t')
            .value_name("TAG")
            .action(ArgAction::Append)
            .help("Only render tokens of this type (repeatable)"),
        Arg::new("rem-base")
            .long("rem-base")
            .value_name("PX")
            .value_parser(clap::value_parser!(f64))
            .help("Pixels per rem for native platforms [default: 16]"),
    ]
}

fn format_options(matches: &ArgMatches) -> FormatOptions {
    let mut options = FormatOptions::default();
    if let Some(selector) = matches.get_one::<String>("selector") {
        options.selector = selector.clone();
    }
    if let Some(name) = matches.get_one::<String>("object-name") {
        options.object_name = name.clone();
    }
    if let Some(package) = matches.get_one::<String>("package") {
        options.package = package.clone();
    }
    if let Some(types) = matches.get_many::<String>("type") {
        options.types = types.cloned().collect();
    }
    if let Some(rem_base) = matches.get_one::<f64>("rem-base") {
        options.rem_base = *rem_base;
    }
    options
}

fn main() {
    let matches = cli().get_matches();
    let verbosity = matches.get_count("verbose");
    let registry = FormatRegistry::with_defaults();

    let result = match matches.subcommand() {
        Some(("build", sub)) => handle_build_command(sub, &registry, verbosity),
        Some(("render", sub)) => handle_render_command(sub, &registry, verbosity),
        Some(("inspect", sub)) => handle_inspect_command(sub, verbosity),
        Some(("formats", _)) => {
            handle_formats_command(&registry);
            Ok(())
        }
        _ => unreachable!("clap requires a subcommand"),
    };

    if let Err(err) = result {
        tracing::debug!("{err:?}");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Handle the build command
fn handle_build_command(
    matches: &ArgMatches,
    registry: &FormatRegistry,
    verbosity: u8,
) -> Result<(), CliError> {
    let config = load_config(matches)?;
    logging::init(&config.logging.level, verbosity);

    let selected: Vec<String> = matches
        .get_many::<String>("platform")
        .map(|names| names.cloned().collect())
        .unwrap_or_default();
    let platforms = config.platform_specs(&selected)?;
    let build = build_tokens(&config, None)?;
    let artifacts = render_platforms(&build, registry, &platforms)?;

    let out_dir = &config.build.out_dir;
    if matches.get_flag("dry-run") {
        for artifact in &artifacts {
            println!("{}", out_dir.join(&artifact.path).display());
        }
        return Ok(());
    }
    for path in write_artifacts(&artifacts, out_dir)? {
        println!("{}", path.display());
    }
    Ok(())
}

/// Handle the render command
fn handle_render_command(
    matches: &ArgMatches,
    registry: &FormatRegistry,
    verbosity: u8,
) -> Result<(), CliError> {
    let config = load_config(matches)?;
    logging::init(&config.logging.level, verbosity);

    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or_default();
    registry.get(format)?;

    let build = build_tokens(&config, feed_path(matches).as_deref())?;
    let options = format_options(matches);
    let rendered = registry.render(format, &RenderContext::new(&build, &options))?;
    print!("{rendered}");
    Ok(())
}

/// Handle the inspect command
fn handle_inspect_command(matches: &ArgMatches, verbosity: u8) -> Result<(), CliError> {
    let config = load_config(matches)?;
    logging::init(&config.logging.level, verbosity);

    let build = build_tokens(&config, feed_path(matches).as_deref())?;
    println!("{}", build.report);
    Ok(())
}

/// Handle the formats command
fn handle_formats_command(registry: &FormatRegistry) {
    println!("Available formats:\n");
    for name in registry.list_formats() {
        let Ok(format) = registry.get(&name) else {
            continue;
        };
        let extensions: Vec<String> = format
            .file_extensions()
            .iter()
            .map(|ext| format!(".{ext}"))
            .collect();
        println!(
            "  {name:<18}{:<10}{}",
            extensions.join(" "),
            format.description()
        );
    }
}

fn feed_path(matches: &ArgMatches) -> Option<PathBuf> {
    matches.get_one::<String>("feed").map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn build_flags_parse() {
        let matches = cli()
            .try_get_matches_from([
                "tokensmith", "-vv", "build", "--platform", "css", "-p", "tailwind", "--dry-run",
            ])
            .unwrap();
        assert_eq!(matches.get_count("verbose"), 2);
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "build");
        let platforms: Vec<_> = sub.get_many::<String>("platform").unwrap().collect();
        assert_eq!(platforms, ["css", "tailwind"]);
        assert!(sub.get_flag("dry-run"));
    }

    #[test]
    fn render_flags_become_format_options() {
        let matches = cli()
            .try_get_matches_from([
                "tokensmith", "render", "-f", "compose/object", "--object-name", "AppColors",
                "--type", "color", "-t", "dimension", "--rem-base", "10",
            ])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        let options = format_options(sub);
        assert_eq!(options.object_name, "AppColors");
        assert_eq!(options.types, ["color", "dimension"]);
        assert_eq!(options.rem_base, 10.0);
        assert_eq!(options.selector, ":root");
    }

    #[test]
    fn render_requires_a_format() {
        assert!(cli().try_get_matches_from(["tokensmith", "render"]).is_err());
    }
}
