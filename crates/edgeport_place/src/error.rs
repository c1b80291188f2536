//! Error types for building a design from parsed block and connectivity records.

use crate::block::{GeometryError, PortError};

/// Structural problems in the input that abort a run before any search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaceError {
    /// A block outline is not a usable rectilinear polygon.
    #[error("malformed geometry for block '{block}': {reason}")]
    MalformedGeometry {
        /// Block name.
        block: String,
        /// What is wrong with the outline.
        reason: GeometryError,
    },

    /// Two blocks share a name.
    #[error("block '{0}' is declared more than once")]
    DuplicateBlock(String),

    /// A connectivity endpoint names a block that was never declared.
    #[error("connectivity references unknown block in '{reference}'")]
    UnknownConnectivityReference {
        /// The `BLOCK.PORT` endpoint as written.
        reference: String,
    },

    /// A connectivity endpoint is not of the form `BLOCK.PORT`.
    #[error("malformed port reference '{0}' (expected BLOCK.PORT)")]
    MalformedReference(String),

    /// A port could not be created on its block.
    #[error("invalid port '{reference}': {reason}")]
    InvalidPort {
        /// The `BLOCK.PORT` endpoint as written.
        reference: String,
        /// Why the port was rejected.
        reason: PortError,
    },
}
