//! The parsed design: named blocks, their ports, and connectivity.
//!
//! Parsers feed block records and then connectivity records into a
//! [`Design`]; the design validates outlines, creates ports the first time a
//! connectivity record names them, and links both endpoints. The result seeds
//! the root [`Configuration`] of the search.

use crate::block::Block;
use crate::configuration::Configuration;
use crate::connectivity::{Connectivity, PortRef};
use crate::error::PlaceError;
use crate::geometry::Point;
use crate::ids::BlockId;
use edgeport_common::{Ident, Interner};
use edgeport_config::{MoveConfig, PlacerConfig};
use std::collections::HashMap;

/// Blocks with their initial port assignments plus connectivity.
pub struct Design {
    interner: Interner,
    blocks: Vec<Block>,
    block_by_name: HashMap<Ident, BlockId>,
    connectivity: Connectivity,
    moves: MoveConfig,
    port_width: i64,
}

impl Design {
    /// Creates an empty design whose blocks use the configured step schedule
    /// and port width.
    pub fn new(config: &PlacerConfig) -> Self {
        Self {
            interner: Interner::new(),
            blocks: Vec::new(),
            block_by_name: HashMap::new(),
            connectivity: Connectivity::new(),
            moves: config.moves.clone(),
            port_width: config.port.width,
        }
    }

    /// Adds a block from its closed outline.
    pub fn add_block(&mut self, name: &str, corners: Vec<Point>) -> Result<BlockId, PlaceError> {
        let ident = self.interner.get_or_intern(name);
        if self.block_by_name.contains_key(&ident) {
            return Err(PlaceError::DuplicateBlock(name.to_string()));
        }
        let id = BlockId::from_raw(self.blocks.len() as u32);
        let block = Block::from_outline(id, ident, corners, &self.moves, self.port_width)
            .map_err(|reason| PlaceError::MalformedGeometry {
                block: name.to_string(),
                reason,
            })?;
        self.blocks.push(block);
        self.block_by_name.insert(ident, id);
        Ok(id)
    }

    /// Links two `BLOCK.PORT` endpoints.
    ///
    /// An endpoint seen for the first time becomes a new port of length
    /// `length` on its block; later records do not change its length.
    pub fn connect(
        &mut self,
        a: &str,
        b: &str,
        length: i64,
        weight: u32,
    ) -> Result<(PortRef, PortRef), PlaceError> {
        let first = self.resolve_or_create(a, length)?;
        let second = self.resolve_or_create(b, length)?;
        self.connectivity.connect(first, second, weight);
        Ok((first, second))
    }

    fn resolve_or_create(&mut self, reference: &str, length: i64) -> Result<PortRef, PlaceError> {
        let (block_name, port_name) = split_reference(reference)?;
        let block_id = self
            .interner
            .get(block_name)
            .and_then(|ident| self.block_by_name.get(&ident).copied())
            .ok_or_else(|| PlaceError::UnknownConnectivityReference {
                reference: reference.to_string(),
            })?;
        let port_ident = self.interner.get_or_intern(port_name);
        let block = &mut self.blocks[block_id.index()];
        let slot = match block.slot_of(port_ident) {
            Some(slot) => slot,
            None => block
                .add_port(port_ident, length)
                .map_err(|reason| PlaceError::InvalidPort {
                    reference: reference.to_string(),
                    reason,
                })?,
        };
        Ok(PortRef::new(block_id, slot as u32))
    }

    /// Finds an existing port by its `BLOCK.PORT` name.
    pub fn port_ref(&self, reference: &str) -> Option<PortRef> {
        let (block_name, port_name) = split_reference(reference).ok()?;
        let block_id = *self.block_by_name.get(&self.interner.get(block_name)?)?;
        let slot = self.blocks[block_id.index()].slot_of(self.interner.get(port_name)?)?;
        Some(PortRef::new(block_id, slot as u32))
    }

    /// `BLOCK.PORT` name of a port.
    pub fn port_name(&self, port: PortRef) -> String {
        let block = &self.blocks[port.block.index()];
        format!(
            "{}.{}",
            self.interner.resolve(block.name()),
            self.interner.resolve(block.slot(port.slot as usize).port.name)
        )
    }

    /// The interner holding block and port names.
    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Blocks in declaration order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Connectivity between ports.
    pub fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }

    /// Total number of ports across all blocks.
    pub fn port_count(&self) -> usize {
        self.blocks.iter().map(Block::port_count).sum()
    }

    /// A fresh clone of every block, every port at its initial assignment.
    pub fn initial_configuration(&self) -> Configuration {
        Configuration::new(self.blocks.clone())
    }
}

fn split_reference(reference: &str) -> Result<(&str, &str), PlaceError> {
    match reference.trim().split_once('.') {
        Some((block, port)) if !block.is_empty() && !port.is_empty() => Ok((block, port)),
        _ => Err(PlaceError::MalformedReference(reference.to_string())),
    }
}
