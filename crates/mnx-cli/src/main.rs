//! # mnx-validate entry point
//!
//! Parses command-line arguments, initializes tracing, and hands the
//! resolved options to the session driver in the library crate.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mnx_cli::{run, Options};

/// MNX document validator.
///
/// Validates MNX files against the MNX JSON schema, then checks the
/// cross-references a schema cannot express: identifier uniqueness,
/// part/layout/measure resolution, multimeasure-rest spans, and the
/// ordering of systems within each score.
#[derive(Parser, Debug)]
#[command(name = "mnx-validate", version, about, long_about = None)]
struct Cli {
    /// Input files, directories, or wildcard patterns (* and ?).
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    /// Recursively search subdirectories of input directories.
    #[arg(long)]
    recursive: bool,

    /// Validate against an alternative schema instead of the embedded one.
    #[arg(long, value_name = "PATH")]
    schema: Option<PathBuf>,

    /// Skip the semantic passes; only check documents against the schema.
    #[arg(long)]
    schema_only: bool,

    /// Log messages to a file instead of stderr (with an optional path).
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    log: Option<Option<PathBuf>>,

    /// Always send messages to stderr, overriding any other logging options.
    #[arg(long)]
    no_log: bool,

    /// Only display warning and error messages.
    #[arg(long)]
    quiet: bool,

    /// Enable verbose output. Repeat for more verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let opts = Options {
        inputs: cli.inputs,
        recursive: cli.recursive,
        schema: cli.schema,
        schema_only: cli.schema_only,
        log: cli.log,
        no_log: cli.no_log,
        quiet: cli.quiet,
    };

    match run(&opts) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
