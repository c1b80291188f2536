//! Readers for the blocks and connectivity input files.
//!
//! Both formats are line oriented. Every problem is reported to the sink with
//! the file and line it came from; reading continues so that one run shows
//! all problems at once.

use edgeport_diagnostics::{Diagnostic, DiagnosticSink, Location};
use edgeport_place::{Design, GeometryError, PlaceError, Point};

/// Unparseable corner in the blocks file.
const E_BAD_CORNER: u16 = 101;
/// Unparseable length or weight in the connectivity file.
const E_BAD_NUMBER: u16 = 104;
/// Connectivity line with the wrong field count.
const W_FIELD_COUNT: u16 = 202;

/// Diagnostic number for a design-building error.
pub fn place_error_code(err: &PlaceError) -> u16 {
    match err {
        PlaceError::MalformedGeometry { .. } => 102,
        PlaceError::DuplicateBlock(_) => 103,
        PlaceError::UnknownConnectivityReference { .. } => 105,
        PlaceError::MalformedReference(_) => 106,
        PlaceError::InvalidPort { .. } => 107,
    }
}

/// Builds the diagnostic for a design-building error at `location`.
fn place_error_diagnostic(err: &PlaceError, location: Location) -> Diagnostic {
    let diag = Diagnostic::error(place_error_code(err), err.to_string()).at(location);
    match err {
        PlaceError::MalformedGeometry {
            reason: GeometryError::WrongAxis(_),
            ..
        } => diag.with_help(
            "start the outline with a vertical edge, e.g. `{0 0}{0 10}{10 10}{10 0}{0 0}`",
        ),
        PlaceError::MalformedGeometry {
            reason: GeometryError::NotClosed,
            ..
        } => diag.with_help("repeat the first corner at the end of the outline"),
        _ => diag,
    }
}

/// Reads `NAME,{x y}{x y}...` lines into `design`.
///
/// Lines without any `{x y}` group are skipped.
pub fn parse_blocks(text: &str, file: &str, design: &mut Design, sink: &DiagnosticSink) {
    for (index, line) in text.lines().enumerate() {
        let location = Location::new(file, index as u32 + 1);
        let Some((name, coords)) = line.trim().split_once(',') else {
            continue;
        };

        let corners = match parse_corners(coords) {
            Ok(corners) => corners,
            Err(reason) => {
                sink.emit(
                    Diagnostic::error(E_BAD_CORNER, format!("bad corner in block '{}': {reason}", name.trim()))
                        .at(location)
                        .with_help("corners are written as `{x y}` with integer coordinates"),
                );
                continue;
            }
        };
        if corners.is_empty() {
            continue;
        }

        if let Err(err) = design.add_block(name.trim(), corners) {
            sink.emit(place_error_diagnostic(&err, location));
        }
    }
}

/// Reads `A.p, B.q, LENGTH, WEIGHT` lines into `design`.
///
/// Lines that do not split into exactly four fields are skipped with a
/// warning. Blank lines are ignored.
pub fn parse_connectivity(text: &str, file: &str, design: &mut Design, sink: &DiagnosticSink) {
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let location = Location::new(file, index as u32 + 1);

        let fields: Vec<&str> = line.split(", ").collect();
        let [a, b, length, weight] = fields.as_slice() else {
            sink.emit(
                Diagnostic::warning(
                    W_FIELD_COUNT,
                    format!("expected 4 fields, found {}; line ignored", fields.len()),
                )
                .at(location)
                .with_help("fields are separated by \", \": `A.p, B.q, LENGTH, WEIGHT`"),
            );
            continue;
        };

        let length = match length.trim().parse::<i64>() {
            Ok(length) => length,
            Err(_) => {
                sink.emit(
                    Diagnostic::error(E_BAD_NUMBER, format!("invalid port length '{length}'"))
                        .at(location),
                );
                continue;
            }
        };
        let weight = match weight.trim().parse::<u32>() {
            Ok(weight) => weight,
            Err(_) => {
                sink.emit(
                    Diagnostic::error(E_BAD_NUMBER, format!("invalid weight '{weight}'"))
                        .at(location),
                );
                continue;
            }
        };

        if let Err(err) = design.connect(a, b, length, weight) {
            sink.emit(place_error_diagnostic(&err, location));
        }
    }
}

fn parse_corners(text: &str) -> Result<Vec<Point>, String> {
    let mut corners = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let close = after
            .find('}')
            .ok_or_else(|| "unterminated '{'".to_string())?;
        corners.push(parse_point(&after[..close])?);
        rest = &after[close + 1..];
    }
    Ok(corners)
}

fn parse_point(text: &str) -> Result<Point, String> {
    let coords: Vec<&str> = text.split_whitespace().collect();
    let [x, y] = coords.as_slice() else {
        return Err(format!("'{{{text}}}' is not a pair of coordinates"));
    };
    let x = x.parse().map_err(|_| format!("'{x}' is not an integer"))?;
    let y = y.parse().map_err(|_| format!("'{y}' is not an integer"))?;
    Ok(Point::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgeport_config::PlacerConfig;
    use edgeport_diagnostics::Severity;

    const BLOCKS: &str = "\
cpu,{0 0}{0 60}{80 60}{80 0}{0 0}
# comment lines have no corners
dsp,{120 0}{120 60}{180 60}{180 0}{120 0}

io,{0 100}{0 140}{180 140}{180 100}{0 100}
";

    fn design() -> Design {
        Design::new(&PlacerConfig::default())
    }

    fn codes(sink: &DiagnosticSink) -> Vec<String> {
        sink.take_all()
            .iter()
            .map(|d| d.code.to_string())
            .collect()
    }

    #[test]
    fn blocks_are_read_in_order() {
        let mut design = design();
        let sink = DiagnosticSink::new();
        parse_blocks(BLOCKS, "blocks.csv", &mut design, &sink);
        assert!(sink.take_all().is_empty());
        let names: Vec<&str> = design
            .blocks()
            .iter()
            .map(|b| design.interner().resolve(b.name()))
            .collect();
        assert_eq!(names, vec!["cpu", "dsp", "io"]);
        assert_eq!(design.blocks()[0].corners()[2], Point::new(80, 60));
    }

    #[test]
    fn line_without_corners_is_skipped() {
        let mut design = design();
        let sink = DiagnosticSink::new();
        parse_blocks("lonely,\nnocomma\n", "blocks.csv", &mut design, &sink);
        assert!(design.blocks().is_empty());
        assert!(sink.take_all().is_empty());
    }

    #[test]
    fn bad_corner_reports_location() {
        let mut design = design();
        let sink = DiagnosticSink::new();
        parse_blocks("ok,{0 0}{0 5}{5 5}{5 0}{0 0}\nbad,{0 0}{0 x}\n", "b.csv", &mut design, &sink);
        let diags = sink.take_all();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code.to_string(), "E101");
        assert_eq!(diags[0].location, Some(Location::new("b.csv", 2)));
        assert_eq!(design.blocks().len(), 1);
    }

    #[test]
    fn malformed_outline_and_duplicates_are_errors() {
        let mut design = design();
        let sink = DiagnosticSink::new();
        let text = "a,{0 0}{0 5}{5 5}{5 0}\nb,{0 0}{0 5}{5 5}{5 0}{0 0}\nb,{0 0}{0 5}{5 5}{5 0}{0 0}\n";
        parse_blocks(text, "b.csv", &mut design, &sink);
        assert_eq!(codes(&sink), vec!["E102", "E103"]);
        assert_eq!(design.blocks().len(), 1);
    }

    #[test]
    fn horizontal_first_edge_suggests_vertical_start() {
        let mut design = design();
        let sink = DiagnosticSink::new();
        parse_blocks("flat,{0 0}{10 0}{10 10}{0 10}{0 0}\n", "b.csv", &mut design, &sink);
        let diags = sink.take_all();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code.to_string(), "E102");
        assert!(diags[0].message.contains("wrong axis"));
        assert_eq!(diags[0].help.len(), 1);
        assert!(diags[0].help[0].contains("vertical edge"));
        assert!(design.blocks().is_empty());
    }

    #[test]
    fn connectivity_links_ports() {
        let mut design = design();
        let sink = DiagnosticSink::new();
        parse_blocks(BLOCKS, "blocks.csv", &mut design, &sink);
        parse_connectivity(
            "cpu.bus, dsp.bus, 6, 4\ncpu.irq, io.irq, 4, 1\n\ncpu.bus, io.dbg, 6, 1\n",
            "con.csv",
            &mut design,
            &sink,
        );
        assert!(sink.take_all().is_empty());
        assert_eq!(design.port_count(), 5);
        assert_eq!(design.connectivity().record_count(), 3);
        let bus = design.port_ref("cpu.bus").unwrap();
        assert_eq!(design.connectivity().links(bus).len(), 2);
    }

    #[test]
    fn wrong_field_count_is_a_warning() {
        let mut design = design();
        let sink = DiagnosticSink::new();
        parse_blocks(BLOCKS, "blocks.csv", &mut design, &sink);
        parse_connectivity("cpu.a, dsp.a, 5\ncpu.b,dsp.b,5,1\n", "con.csv", &mut design, &sink);
        let diags = sink.take_all();
        assert_eq!(diags.len(), 2);
        assert!(diags.iter().all(|d| d.severity == Severity::Warning));
        assert_eq!(diags[1].location, Some(Location::new("con.csv", 2)));
        assert_eq!(design.port_count(), 0);
    }

    #[test]
    fn bad_numbers_and_unknown_blocks_are_errors() {
        let mut design = design();
        let sink = DiagnosticSink::new();
        parse_blocks(BLOCKS, "blocks.csv", &mut design, &sink);
        parse_connectivity(
            "cpu.a, dsp.a, five, 1\ncpu.a, gpu.a, 5, 1\ncpu.a, dsp.a, 5, -2\ncpu, dsp.a, 5, 1\ncpu.z, dsp.z, 0, 1\n",
            "con.csv",
            &mut design,
            &sink,
        );
        assert_eq!(codes(&sink), vec!["E104", "E105", "E104", "E106", "E107"]);
    }

    #[test]
    fn corner_parser_edge_cases() {
        assert_eq!(
            parse_corners(" {0 0} {-5 10}").unwrap(),
            vec![Point::new(0, 0), Point::new(-5, 10)]
        );
        assert!(parse_corners("").unwrap().is_empty());
        assert!(parse_corners("{0 0").is_err());
        assert!(parse_corners("{1 2 3}").is_err());
    }
}
