//! Shared pipeline helpers for CLI commands.
//!
//! Config resolution with command-line overrides, loading both input files
//! into a [`Design`], diagnostic rendering, and cargo-style status lines.

use std::path::{Path, PathBuf};

use edgeport_config::loader::validate_config;
use edgeport_config::PlacerConfig;
use edgeport_diagnostics::{
    Diagnostic, DiagnosticRenderer, DiagnosticSink, Severity, TerminalRenderer,
};
use edgeport_place::Design;

use crate::input::{parse_blocks, parse_connectivity};
use crate::{GlobalArgs, InputArgs, ReportFormat};

/// Name of the configuration file picked up from the working directory.
pub const CONFIG_FILE: &str = "edgeport.toml";

/// Search settings given on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SearchOverrides {
    /// Replaces `search.iterations`.
    pub iterations: Option<u32>,
    /// Replaces `search.seed`.
    pub seed: Option<u64>,
    /// Replaces `search.penalty`.
    pub penalty: Option<f64>,
}

/// Finds the configuration file to load, if any.
///
/// `--config` wins; otherwise `edgeport.toml` in `cwd` is used when present.
pub fn resolve_config_path(global: &GlobalArgs, cwd: &Path) -> Option<PathBuf> {
    match global.config {
        Some(ref path) => Some(PathBuf::from(path)),
        None => {
            let candidate = cwd.join(CONFIG_FILE);
            candidate.is_file().then_some(candidate)
        }
    }
}

/// Loads the configuration, applies overrides, and validates the result.
pub fn load_settings(
    global: &GlobalArgs,
    overrides: &SearchOverrides,
) -> Result<PlacerConfig, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let mut config = match resolve_config_path(global, &cwd) {
        Some(path) => edgeport_config::load_config(&path)
            .map_err(|e| format!("failed to load {}: {e}", path.display()))?,
        None => PlacerConfig::default(),
    };
    apply_overrides(&mut config, overrides);
    validate_config(&config)?;
    Ok(config)
}

/// Copies every override that is set into `config`.
pub fn apply_overrides(config: &mut PlacerConfig, overrides: &SearchOverrides) {
    if let Some(iterations) = overrides.iterations {
        config.search.iterations = iterations;
    }
    if let Some(seed) = overrides.seed {
        config.search.seed = Some(seed);
    }
    if let Some(penalty) = overrides.penalty {
        config.search.penalty = penalty;
    }
}

/// Reads both input files into a new design.
///
/// Problems in the input are emitted to `sink`; only I/O failures are
/// returned as errors. Connectivity is not read if the blocks file had
/// errors.
pub fn load_design(
    inputs: &InputArgs,
    config: &PlacerConfig,
    sink: &DiagnosticSink,
) -> Result<Design, Box<dyn std::error::Error>> {
    let mut design = Design::new(config);

    let blocks = read_input(&inputs.blocks)?;
    parse_blocks(&blocks, &display_name(&inputs.blocks), &mut design, sink);
    if sink.has_errors() {
        return Ok(design);
    }

    let connectivity = read_input(&inputs.connectivity)?;
    parse_connectivity(
        &connectivity,
        &display_name(&inputs.connectivity),
        &mut design,
        sink,
    );
    Ok(design)
}

fn read_input(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()).into())
}

fn display_name(path: &Path) -> String {
    path.display().to_string()
}

/// Renders diagnostics as text on stderr or as a JSON array on stdout.
pub fn render_diagnostics(diagnostics: &[Diagnostic], format: ReportFormat, global: &GlobalArgs) {
    match format {
        ReportFormat::Text => {
            let renderer = TerminalRenderer::new(global.color);
            for diag in diagnostics {
                if global.quiet && !diag.severity.is_error() {
                    continue;
                }
                eprintln!("{}", renderer.render(diag));
            }
        }
        ReportFormat::Json => {
            let json =
                serde_json::to_string_pretty(diagnostics).unwrap_or_else(|_| "[]".to_string());
            println!("{json}");
        }
    }
}

/// Counts errors and warnings.
pub fn summarize(diagnostics: &[Diagnostic]) -> (usize, usize) {
    let errors = diagnostics
        .iter()
        .filter(|d| d.severity.is_error())
        .count();
    let warnings = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count();
    (errors, warnings)
}

/// Prints a right-aligned cargo-style status line unless `--quiet` is set.
pub fn status(global: &GlobalArgs, verb: &str, message: impl std::fmt::Display) {
    if !global.quiet {
        eprintln!("{verb:>12} {message}");
    }
}
