//! Diagnostic rendering for terminal output.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic) -> String;
}

/// Renders diagnostics in a rustc-style terminal format.
///
/// ```text
/// error[E101]: connectivity references unknown block 'dsp'
///   --> con.csv:4
///    = help: declare the block in the blocks file
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, severity: Severity, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        let ansi = match severity {
            Severity::Error => "\x1b[1;31m",
            Severity::Warning => "\x1b[1;33m",
            Severity::Note => "\x1b[1;36m",
        };
        format!("{ansi}{text}\x1b[0m")
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = String::new();

        let header = format!("{}[{}]", diag.severity, diag.code);
        out.push_str(&format!(
            "{}: {}\n",
            self.paint(diag.severity, &header),
            diag.message
        ));

        if let Some(location) = &diag.location {
            out.push_str(&format!("  --> {location}\n"));
        }
        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;

    #[test]
    fn render_error_with_location() {
        let diag = Diagnostic::error(101, "connectivity references unknown block 'dsp'")
            .at(Location::new("con.csv", 4));
        let output = TerminalRenderer::new(false).render(&diag);
        assert!(output.starts_with("error[E101]: connectivity references unknown block 'dsp'"));
        assert!(output.contains("--> con.csv:4"));
    }

    #[test]
    fn render_warning_with_notes() {
        let diag = Diagnostic::warning(201, "port 'p3' not exported")
            .with_note("footprint extent 12 exceeds edge length 8")
            .with_help("shorten the port or enlarge the block");
        let output = TerminalRenderer::new(false).render(&diag);
        assert!(output.contains("warning[W201]"));
        assert!(output.contains("= note: footprint extent 12"));
        assert!(output.contains("= help: shorten the port"));
        assert!(!output.contains("-->"));
    }

    #[test]
    fn render_with_color() {
        let diag = Diagnostic::note(301, "no ports to place");
        let output = TerminalRenderer::new(true).render(&diag);
        assert!(output.contains("\x1b["));
        assert!(output.contains("note[N301]"));
    }
}
