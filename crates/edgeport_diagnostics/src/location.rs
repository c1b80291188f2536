//! Input file locations attached to diagnostics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 1-based line in a named input file.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Location {
    /// Path of the input file, as given on the command line.
    pub file: String,
    /// 1-based line number.
    pub line: u32,
}

impl Location {
    /// Creates a location for `line` of `file`.
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
