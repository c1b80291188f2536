//! Structured diagnostic messages with severity, codes, and notes.

use crate::code::{Category, DiagnosticCode};
use crate::location::Location;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// A structured diagnostic message.
///
/// Each diagnostic carries a severity, a code, a primary message, an optional
/// input location, and any number of notes and help lines.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The code identifying the kind of diagnostic.
    pub code: DiagnosticCode,
    /// The main diagnostic message.
    pub message: String,
    /// Where in the input the issue was detected, if anywhere.
    pub location: Option<Location>,
    /// Explanatory footnotes.
    pub notes: Vec<String>,
    /// Actionable suggestions.
    pub help: Vec<String>,
}

impl Diagnostic {
    fn with_severity(severity: Severity, code: DiagnosticCode, message: String) -> Self {
        Self {
            severity,
            code,
            message,
            location: None,
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Creates a new error diagnostic.
    pub fn error(number: u16, message: impl Into<String>) -> Self {
        Self::with_severity(
            Severity::Error,
            DiagnosticCode::new(Category::Error, number),
            message.into(),
        )
    }

    /// Creates a new warning diagnostic.
    pub fn warning(number: u16, message: impl Into<String>) -> Self {
        Self::with_severity(
            Severity::Warning,
            DiagnosticCode::new(Category::Warning, number),
            message.into(),
        )
    }

    /// Creates a new note diagnostic.
    pub fn note(number: u16, message: impl Into<String>) -> Self {
        Self::with_severity(
            Severity::Note,
            DiagnosticCode::new(Category::Note, number),
            message.into(),
        )
    }

    /// Attaches an input location.
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a help message to this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_error() {
        let diag = Diagnostic::error(101, "unknown block 'cpu'");
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(format!("{}", diag.code), "E101");
        assert!(diag.location.is_none());
    }

    #[test]
    fn builder_methods() {
        let diag = Diagnostic::warning(202, "connectivity line ignored")
            .at(Location::new("con.csv", 3))
            .with_note("expected 4 fields, found 2")
            .with_help("use `A.p, B.q, LENGTH, WEIGHT`");
        assert_eq!(diag.location, Some(Location::new("con.csv", 3)));
        assert_eq!(diag.notes.len(), 1);
        assert_eq!(diag.help.len(), 1);
    }

    #[test]
    fn serde_roundtrip() {
        let diag = Diagnostic::note(301, "no ports to place");
        let json = serde_json::to_string(&diag).unwrap();
        let back: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(back.message, "no ports to place");
        assert_eq!(back.code, diag.code);
    }
}
