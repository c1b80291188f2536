//! Port-to-port connectivity.
//!
//! Every record is stored from both endpoints, so the map is symmetric by
//! construction. Keys are ordered so that cost sums visit links in a fixed
//! order regardless of hashing.

use crate::ids::BlockId;
use std::collections::BTreeMap;

/// A port addressed by its block and its stable slot within that block.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct PortRef {
    /// Owning block.
    pub block: BlockId,
    /// Slot index within the block.
    pub slot: u32,
}

impl PortRef {
    /// Creates a port reference.
    pub fn new(block: BlockId, slot: u32) -> Self {
        Self { block, slot }
    }
}

/// One directed half of a connectivity record.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Link {
    /// The port at the other end.
    pub peer: PortRef,
    /// Record weight. Stored but not used by the cost model.
    pub weight: u32,
}

/// Symmetric adjacency list of connected ports.
#[derive(Clone, Debug, Default)]
pub struct Connectivity {
    links: BTreeMap<PortRef, Vec<Link>>,
    records: usize,
}

impl Connectivity {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a connection between `a` and `b` in both directions.
    pub fn connect(&mut self, a: PortRef, b: PortRef, weight: u32) {
        self.links.entry(a).or_default().push(Link { peer: b, weight });
        self.links.entry(b).or_default().push(Link { peer: a, weight });
        self.records += 1;
    }

    /// Links leaving `port`; empty if the port is unconnected.
    pub fn links(&self, port: PortRef) -> &[Link] {
        self.links.get(&port).map_or(&[], Vec::as_slice)
    }

    /// Iterates every port with its links, in port order.
    pub fn iter(&self) -> impl Iterator<Item = (PortRef, &[Link])> {
        self.links.iter().map(|(port, links)| (*port, links.as_slice()))
    }

    /// Number of records ingested.
    pub fn record_count(&self) -> usize {
        self.records
    }
}
