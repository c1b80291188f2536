//! Writers for the port footprint CSV and the JSON search trace.

use std::fmt::Write as _;
use std::path::Path;

use edgeport_place::{ExportedPort, SearchReport};

/// Formats one line per port: `PORT, { x y } { x y } { x y } { x y }`.
pub fn format_ports(ports: &[ExportedPort]) -> String {
    let mut out = String::new();
    for port in ports {
        let _ = write!(out, "{},", port.port);
        for corner in &port.corners {
            let _ = write!(out, " {{ {} {} }}", corner.x, corner.y);
        }
        out.push('\n');
    }
    out
}

/// Writes the footprint CSV to `path`.
pub fn write_ports(path: &Path, ports: &[ExportedPort]) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::write(path, format_ports(ports))
        .map_err(|e| format!("failed to write {}: {e}", path.display()).into())
}

/// Writes the search report to `path` as pretty-printed JSON.
pub fn write_trace(path: &Path, report: &SearchReport) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)
        .map_err(|e| format!("failed to write {}: {e}", path.display()).into())
}
