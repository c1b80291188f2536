//! Port placement on the edges of rectilinear blocks.
//!
//! This crate takes parsed block outlines and port connectivity, assigns every
//! port an initial position on its block's perimeter, and refines those
//! positions with a Monte Carlo tree search whose rollouts are short
//! simulated-annealing runs. The cost of a placement is the Euclidean
//! wirelength between connected ports plus a weighted penalty for ports that
//! share space on the same edge.
//!
//! # Pipeline
//!
//! 1. **Build**: feed blocks, then connectivity records, into a [`Design`]
//! 2. **Search**: [`SearchEngine`] grows a tree of [`Configuration`]s from the
//!    design's initial assignment
//! 3. **Extract**: follow the best exploitation value from the root to a leaf
//! 4. **Export**: [`export_ports`] turns the leaf into per-port footprints
//!
//! # Usage
//!
//! ```ignore
//! use edgeport_place::{optimize, Design};
//!
//! let mut design = Design::new(&config);
//! design.add_block("cpu", corners)?;
//! design.connect("cpu.irq", "pic.irq", 6, 1)?;
//! let (best, report) = optimize(&design, &config.search, &sink)?;
//! ```

#![warn(missing_docs)]

pub mod action;
pub mod block;
pub mod configuration;
pub mod connectivity;
pub mod design;
pub mod error;
pub mod export;
pub mod geometry;
pub mod ids;
pub mod port;
pub mod search;

pub use action::{Action, ActionSet, Direction};
pub use block::{Block, Edge, GeometryError, PortError, PortSlot, StepSchedule};
pub use configuration::Configuration;
pub use connectivity::{Connectivity, Link, PortRef};
pub use design::Design;
pub use error::PlaceError;
pub use export::{export_ports, ExportedPort};
pub use geometry::{Footprint, Point};
pub use ids::{BlockId, NodeId};
pub use port::Port;
pub use search::{SearchEngine, SearchProgress, SearchReport};

use edgeport_common::EdgeportResult;
use edgeport_config::SearchConfig;
use edgeport_diagnostics::DiagnosticSink;

/// Runs the full search budget on `design` and returns the extracted
/// configuration with its report.
///
/// Fails only if the extracted configuration's tracked overlap has drifted
/// from a recount, which indicates a bug.
pub fn optimize(
    design: &Design,
    settings: &SearchConfig,
    sink: &DiagnosticSink,
) -> EdgeportResult<(Configuration, SearchReport)> {
    let mut engine = SearchEngine::new(design, settings);
    let report = engine.run(sink);
    let best = engine.best_configuration().clone();
    best.verify_overlap()?;
    Ok((best, report))
}
