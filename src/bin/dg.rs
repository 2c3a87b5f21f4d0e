//! Command-line interface for dg
//! Expands a .dg template file into every advertisement it describes.
//!
//! Usage:
//!   dg `<input>` [`<output>`] [--skip-long] [--format `<format>`] [--strict] [--config `<file>`]
//!   dg --list-formats
//!
//! The output defaults to `<input>.csv` next to the input file. Logging goes to stderr
//! and follows `RUST_LOG` (default `warn`, `debug` with --verbose).

use clap::{Arg, ArgAction, Command};
use dg::dg::app::{run, RunSettings};
use dg::dg::formats::{FormatRegistry, Formatter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = Command::new("dg")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate advertisements from a .dg template file")
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .help("Path to the .dg file")
                .required_unless_present("list-formats")
                .value_parser(clap::value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("output")
                .help("Where to write the advertisements (default: <input>.csv)")
                .value_parser(clap::value_parser!(PathBuf))
                .index(2),
        )
        .arg(
            Arg::new("skip-long")
                .long("skip-long")
                .short('s')
                .help("Skip advertisements whose title or text is too long")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (default: from the output extension)"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Fail on bracketed lines that are not known section markers")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("YAML configuration file layered over the built-in defaults")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log debug information to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    init_tracing(matches.get_flag("verbose"));

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let Some(input) = matches.get_one::<PathBuf>("input").cloned() else {
        eprintln!("Error: an input file is required");
        std::process::exit(2);
    };
    let settings = RunSettings {
        input,
        output: matches.get_one::<PathBuf>("output").cloned(),
        format: matches.get_one::<String>("format").cloned(),
        skip_long: matches.get_flag("skip-long"),
        strict: matches.get_flag("strict"),
        config: matches.get_one::<PathBuf>("config").cloned(),
    };

    match run(&settings) {
        Ok(summary) => {
            eprintln!(
                "Wrote {} advertisements to {} ({} skipped)",
                summary.written,
                summary.output.display(),
                summary.skipped
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::with_defaults();
    println!("Available output formats:\n");

    for name in registry.list_formats() {
        if let Some(formatter) = registry.get(&name) {
            println!("  {}", formatter.name());
            println!("    {}", formatter.description());
            println!();
        }
    }
}
