//! Labelindex: build `path;label` manifests from per-subject image folders.
//!
//! Given a root directory with one subdirectory per subject (person, class,
//! identity), labelindex assigns each subject a label by sorted name order
//! and writes one manifest line per file, ready for a training pipeline.
//!
//! # Modules
//!
//! - [`manifest`]: Directory scanning, label assignment and the line format
//! - [`inspect`]: Summaries of an existing manifest
//! - [`error`]: Error types for labelindex operations

pub mod error;
pub mod inspect;
pub mod logging;
pub mod manifest;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use error::{ErrorKind, LabelIndexError};

/// The labelindex CLI application.
#[derive(Parser)]
#[command(name = "labelindex")]
#[command(version, author, about)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Increase diagnostic output on stderr (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Build options used when no subcommand is given.
    #[command(flatten)]
    build: BuildArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Scan a subject tree and write the manifest (the default).
    Build(BuildArgs),
    /// Summarize an existing manifest.
    Inspect(InspectArgs),
}

/// Arguments for the build subcommand.
#[derive(clap::Args)]
struct BuildArgs {
    /// Directory containing one subdirectory per subject.
    #[arg(long, env = "LABELINDEX_ROOT", default_value = manifest::DEFAULT_ROOT)]
    root: PathBuf,

    /// Manifest file to create (truncated if it exists).
    #[arg(long, env = "LABELINDEX_OUTPUT", default_value = manifest::DEFAULT_OUTPUT)]
    output: PathBuf,
}

/// Arguments for the inspect subcommand.
#[derive(clap::Args)]
struct InspectArgs {
    /// Manifest file to read.
    input: PathBuf,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,

    /// Fail if labels do not cover 0..=max without gaps.
    #[arg(long)]
    strict: bool,
}

/// Run the labelindex CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), LabelIndexError> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Build(args)) => run_build(args),
        Some(Commands::Inspect(args)) => run_inspect(args),
        None => run_build(cli.build),
    }
}

/// Print a failure to stdout in the form the CLI reports it.
pub fn print_error(err: &LabelIndexError) {
    match err {
        LabelIndexError::MissingRootDirectory { cwd, .. } => {
            println!("Error: {}", err);
            println!("Current working directory: {}", cwd.display());
        }
        other => println!("An error occurred: {}", other),
    }
}

/// Execute the build subcommand.
fn run_build(args: BuildArgs) -> Result<(), LabelIndexError> {
    let options = manifest::BuildOptions {
        root: args.root,
        output: args.output,
    };
    let summary = manifest::build_manifest(&options)?;
    println!("{}", summary);
    Ok(())
}

/// Execute the inspect subcommand.
fn run_inspect(args: InspectArgs) -> Result<(), LabelIndexError> {
    let parsed = manifest::format::read_manifest(&args.input)?;
    let report = inspect::inspect_manifest(&parsed, &inspect::InspectOptions::default());

    match args.output.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| LabelIndexError::Io(e.into()))?;
            println!("{}", json);
        }
        "text" => print!("{}", report),
        other => {
            return Err(LabelIndexError::UnsupportedFormat(format!(
                "'{}' (supported: text, json)",
                other
            )));
        }
    }

    if args.strict && !report.contiguous {
        return Err(LabelIndexError::NonContiguousLabels {
            missing_count: report.missing_count,
            max_label: report.max_label.unwrap_or(0),
        });
    }

    Ok(())
}
