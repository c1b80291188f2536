//! `edgeport run`: the placement pipeline.
//!
//! 1. Load config and apply command-line overrides
//! 2. Read blocks, then connectivity, into a design
//! 3. Search
//! 4. Export the extracted configuration's footprints
//! 5. Render diagnostics

use edgeport_diagnostics::DiagnosticSink;
use edgeport_place::{export_ports, SearchEngine};

use crate::output::{write_ports, write_trace};
use crate::pipeline::{
    load_design, load_settings, render_diagnostics, status, summarize, SearchOverrides,
};
use crate::{GlobalArgs, RunArgs};

/// Iterations between progress lines in verbose mode.
const PROGRESS_INTERVAL: u64 = 100;

/// Runs the `edgeport run` command.
///
/// Returns exit code 0 on success and 1 if the input had errors.
pub fn run(args: &RunArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let overrides = SearchOverrides {
        iterations: args.iterations,
        seed: args.seed,
        penalty: args.penalty,
    };
    let config = load_settings(global, &overrides)?;

    status(
        global,
        "Loading",
        format!(
            "{} and {}",
            args.inputs.blocks.display(),
            args.inputs.connectivity.display()
        ),
    );
    let sink = DiagnosticSink::new();
    let design = load_design(&args.inputs, &config, &sink)?;

    if sink.has_errors() {
        let diagnostics = sink.take_all();
        render_diagnostics(&diagnostics, args.format, global);
        let (errors, _) = summarize(&diagnostics);
        eprintln!("error: could not place ports due to {errors} previous error(s)");
        return Ok(1);
    }

    status(
        global,
        "Searching",
        format!(
            "{} port(s) on {} block(s), {} iteration(s)",
            design.port_count(),
            design.blocks().len(),
            config.search.iterations
        ),
    );
    let mut engine = SearchEngine::new(&design, &config.search);
    let report = engine.run_with(&sink, |progress| {
        if global.verbose && !global.quiet && progress.completed % PROGRESS_INTERVAL == 0 {
            eprintln!(
                "{:>12} {}/{}: cost {:.3}, depth {}, {} uphill kept, {} undone, {} node(s)",
                "Iteration",
                progress.completed,
                progress.budget,
                progress.cost,
                progress.depth,
                progress.uphill_kept,
                progress.rejected,
                progress.nodes
            );
        }
        true
    });

    let best = engine.best_configuration();
    best.verify_overlap()?;
    let ports = export_ports(&design, best, &sink);
    write_ports(&args.output, &ports)?;
    if let Some(ref trace) = args.trace {
        write_trace(trace, &report)?;
    }

    let diagnostics = sink.take_all();
    render_diagnostics(&diagnostics, args.format, global);
    let (_, warnings) = summarize(&diagnostics);

    status(
        global,
        "Finished",
        format!(
            "cost {:.3} (initial {:.3}) in {:.2}s, {} port(s) written to {}{}",
            report.final_cost,
            report.initial_cost,
            report.elapsed_secs,
            ports.len(),
            args.output.display(),
            if warnings > 0 {
                format!(", {warnings} warning(s)")
            } else {
                String::new()
            }
        ),
    );
    Ok(0)
}
