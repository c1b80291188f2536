//! `edgeport check`: validate inputs and price the initial placement.

use edgeport_diagnostics::DiagnosticSink;
use edgeport_place::Design;

use crate::pipeline::{
    load_design, load_settings, render_diagnostics, summarize, SearchOverrides,
};
use crate::{CheckArgs, GlobalArgs, ReportFormat};

/// Runs the `edgeport check` command.
///
/// Returns exit code 0 if the inputs are usable, 1 otherwise.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let overrides = SearchOverrides {
        penalty: args.penalty,
        ..SearchOverrides::default()
    };
    let config = load_settings(global, &overrides)?;

    let sink = DiagnosticSink::new();
    let design = load_design(&args.inputs, &config, &sink)?;
    let diagnostics = sink.take_all();
    let (errors, warnings) = summarize(&diagnostics);
    let initial = (errors == 0).then(|| initial_cost(&design, config.search.penalty));

    match args.format {
        ReportFormat::Text => {
            render_diagnostics(&diagnostics, args.format, global);
            if let Some(cost) = initial {
                println!(
                    "{} block(s), {} port(s), {} connection(s), initial cost {cost:.3}",
                    design.blocks().len(),
                    design.port_count(),
                    design.connectivity().record_count()
                );
            }
            if !global.quiet {
                eprintln!("{:>12} {errors} error(s), {warnings} warning(s)", "Result:");
            }
        }
        ReportFormat::Json => {
            let summary = serde_json::json!({
                "blocks": design.blocks().len(),
                "ports": design.port_count(),
                "connections": design.connectivity().record_count(),
                "initial_cost": initial,
                "diagnostics": diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(if errors > 0 { 1 } else { 0 })
}

fn initial_cost(design: &Design, penalty: f64) -> f64 {
    design
        .initial_configuration()
        .total_cost(design.connectivity(), penalty)
}
