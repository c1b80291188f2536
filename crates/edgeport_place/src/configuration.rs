//! Full placement snapshots and their cost model.
//!
//! A [`Configuration`] owns an independent clone of every block. Cloning one
//! never aliases block state, so moves applied to a copy stay local to it.

use crate::action::Action;
use crate::block::Block;
use crate::connectivity::{Connectivity, PortRef};
use crate::geometry::Footprint;
use crate::ids::BlockId;
use edgeport_common::{EdgeportResult, InternalError};

/// Positions of every port on every block.
#[derive(Clone, Debug)]
pub struct Configuration {
    blocks: Vec<Block>,
}

impl Configuration {
    /// Wraps a list of blocks indexed by [`BlockId`].
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// All blocks.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// The block with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID is out of bounds.
    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.index()]
    }

    /// Footprint of a port in global coordinates.
    pub fn footprint(&self, port: PortRef) -> Footprint {
        self.block(port.block).footprint(port.slot as usize)
    }

    /// Euclidean distance between the footprint midpoints of two ports.
    pub fn distance(&self, a: PortRef, b: PortRef) -> f64 {
        self.footprint(a).distance(&self.footprint(b))
    }

    /// Wirelength attributable to one port: the distance to each of its
    /// connectivity neighbors.
    pub fn port_wirelength(&self, connectivity: &Connectivity, port: PortRef) -> f64 {
        connectivity
            .links(port)
            .iter()
            .map(|link| self.distance(port, link.peer))
            .sum()
    }

    /// Total wirelength, each undirected connection counted once.
    pub fn wirelength(&self, connectivity: &Connectivity) -> f64 {
        let doubled: f64 = connectivity
            .iter()
            .map(|(port, links)| {
                links
                    .iter()
                    .map(|link| self.distance(port, link.peer))
                    .sum::<f64>()
            })
            .sum();
        doubled / 2.0
    }

    /// Overlap of every block, recomputed from scratch.
    pub fn total_overlap(&self) -> i64 {
        self.blocks.iter().map(Block::total_overlap).sum()
    }

    /// Verifies that every block's incrementally tracked overlap matches a
    /// from-scratch recount.
    pub fn verify_overlap(&self) -> EdgeportResult<()> {
        for block in &self.blocks {
            let recomputed = block.total_overlap();
            if block.overlap_cost() != recomputed {
                return Err(InternalError::new(format!(
                    "overlap of block {} drifted: tracked {}, recomputed {recomputed}",
                    block.id(),
                    block.overlap_cost()
                )));
            }
        }
        Ok(())
    }

    /// `wirelength + penalty * overlap`, with overlap recomputed from scratch.
    ///
    /// Too slow for per-move use; rollouts track deltas instead.
    pub fn total_cost(&self, connectivity: &Connectivity, penalty: f64) -> f64 {
        self.wirelength(connectivity) + penalty * self.total_overlap() as f64
    }

    /// Applies an action at global iteration `iteration` and returns the
    /// overlap delta of the touched block.
    pub fn apply(&mut self, action: Action, iteration: u64) -> i64 {
        self.blocks[action.port.block.index()].move_port(
            action.port.slot as usize,
            action.direction,
            iteration,
        )
    }
}
