//! Port footprints of a finished configuration, ready for writing out.

use crate::configuration::Configuration;
use crate::connectivity::PortRef;
use crate::design::Design;
use crate::geometry::Point;
use edgeport_diagnostics::{Diagnostic, DiagnosticSink};
use serde::Serialize;

/// One port's footprint in global coordinates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExportedPort {
    /// Name of the owning block.
    pub block: String,
    /// Port name within the block.
    pub port: String,
    /// Corners in the order `(xs, ys)`, `(xs, ye)`, `(xe, ye)`, `(xe, ys)`.
    pub corners: [Point; 4],
}

/// Collects the footprint of every port in block, then slot, order.
///
/// A port whose footprint extent exceeds the length of its edge is left out
/// and reported as `W201`.
pub fn export_ports(
    design: &Design,
    configuration: &Configuration,
    sink: &DiagnosticSink,
) -> Vec<ExportedPort> {
    let interner = design.interner();
    let mut exported = Vec::new();

    for block in configuration.blocks() {
        for (index, slot) in block.slots().iter().enumerate() {
            let footprint = block.footprint(index);
            let edge_length = block.edges()[slot.edge].length;
            if footprint.extent() > edge_length {
                let name = design.port_name(PortRef::new(block.id(), index as u32));
                sink.emit(
                    Diagnostic::warning(
                        201,
                        format!("port '{name}' does not fit on edge {} and was not exported", slot.edge),
                    )
                    .with_note(format!(
                        "footprint extent is {}, edge length is {edge_length}",
                        footprint.extent()
                    )),
                );
                continue;
            }
            exported.push(ExportedPort {
                block: interner.resolve(block.name()).to_string(),
                port: interner.resolve(slot.port.name).to_string(),
                corners: footprint.corners(),
            });
        }
    }
    exported
}
