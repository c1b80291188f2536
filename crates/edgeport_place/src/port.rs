//! Ports: named connection points with a footprint length.

use crate::ids::BlockId;
use edgeport_common::Ident;

/// A port attached to one block.
///
/// Ports carry no behavior of their own; the owning block decides where they
/// sit. `block` is a back-reference by index, not ownership.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Port {
    /// Port name, unique within its block.
    pub name: Ident,
    /// Footprint length along the hosting edge.
    pub length: i64,
    /// The block this port belongs to.
    pub block: BlockId,
}

impl Port {
    /// Creates a port.
    pub fn new(name: Ident, length: i64, block: BlockId) -> Self {
        Self {
            name,
            length,
            block,
        }
    }
}
