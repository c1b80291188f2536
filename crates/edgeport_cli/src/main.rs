//! Edgeport CLI: the command-line front end of the port placer.
//!
//! Provides `edgeport run` to place ports and write their footprints, and
//! `edgeport check` to validate inputs and report the initial cost without
//! searching.

#![warn(missing_docs)]

mod check;
mod input;
mod output;
mod pipeline;
mod run;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Edgeport places I/O ports on the edges of rectilinear blocks.
#[derive(Parser, Debug)]
#[command(name = "edgeport", version, about = "Edgeport port placer")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print search progress while running.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to an `edgeport.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Place ports and write their footprints.
    Run(RunArgs),
    /// Validate inputs and print the initial cost.
    Check(CheckArgs),
}

/// Block and connectivity input files.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Blocks file: `NAME,{x y}{x y}...` per line.
    pub blocks: PathBuf,

    /// Connectivity file: `A.p, B.q, LENGTH, WEIGHT` per line.
    pub connectivity: PathBuf,
}

/// Arguments for the `edgeport run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Where to write the exported port footprints.
    #[arg(short, long, default_value = "ports.csv")]
    pub output: PathBuf,

    /// Write a JSON search report (per-iteration costs, timing) to this file.
    #[arg(long)]
    pub trace: Option<PathBuf>,

    /// Override `search.iterations`.
    #[arg(long)]
    pub iterations: Option<u32>,

    /// Override `search.seed`.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override `search.penalty`.
    #[arg(long)]
    pub penalty: Option<f64>,

    /// Output format for diagnostics.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `edgeport check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Override `search.penalty` when pricing the initial placement.
    #[arg(long)]
    pub penalty: Option<f64>,

    /// Output format for diagnostics and the summary.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Diagnostic output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print search progress.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Run(ref args) => run::run(args, &global),
        Command::Check(ref args) => check::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
