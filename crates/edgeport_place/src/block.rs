//! Blocks: fixed rectilinear regions whose perimeter edges host ports.
//!
//! A block owns its edges and the `(port, edge, position)` assignment of every
//! port placed on it, and keeps a cached overlap cost that [`Block::move_port`]
//! updates incrementally. Only the edges a move touches are rescanned.

use crate::action::Direction;
use crate::geometry::{interval_overlap, Footprint, Point};
use crate::ids::BlockId;
use crate::port::Port;
use edgeport_common::Ident;
use edgeport_config::MoveConfig;
use std::collections::HashMap;

/// Reasons a corner list does not describe a usable block outline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    /// The last corner differs from the first.
    #[error("outline is not closed (last corner must equal the first)")]
    NotClosed,
    /// Fewer than four edges.
    #[error("outline has {0} edge(s), a rectilinear block needs at least 4")]
    TooFewEdges(usize),
    /// Both coordinates change between two consecutive corners.
    #[error("edge {0} is not axis-aligned")]
    Diagonal(usize),
    /// Two consecutive corners coincide.
    #[error("edge {0} has zero length")]
    ZeroLength(usize),
    /// An even edge runs along x or an odd edge runs along y.
    #[error("edge {0} runs along the wrong axis (even edges must be vertical, odd edges horizontal)")]
    WrongAxis(usize),
}

/// Reasons a port cannot be added to a block.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    /// A port with the same name already sits on the block.
    #[error("port already exists on this block")]
    Duplicate,
    /// Port lengths must be positive.
    #[error("port length {0} is not positive")]
    NonPositiveLength(i64),
}

/// One perimeter segment between two consecutive corners.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Edge {
    /// Corner the edge starts from.
    pub start: Point,
    /// Manhattan distance between the two corners.
    pub length: i64,
    /// `+1` if the edge runs toward increasing x or y, else `-1`.
    pub sign: i64,
}

/// Where a port currently sits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortSlot {
    /// The port.
    pub port: Port,
    /// Index of the hosting edge.
    pub edge: usize,
    /// Offset of the port's start along the edge.
    pub position: i64,
}

/// Step schedule shared by every move on a block.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct StepSchedule {
    /// Largest step.
    pub max_step: i64,
    /// Base of the decay term.
    pub step_decay: f64,
}

impl StepSchedule {
    /// Step size at global iteration `iteration`:
    /// `max(1, floor(max_step - step_decay^iteration))`.
    pub fn step(&self, iteration: u64) -> i64 {
        let raw = (self.max_step as f64 - self.step_decay.powf(iteration as f64)).floor();
        if raw >= 1.0 {
            raw as i64
        } else {
            1
        }
    }
}

impl From<&MoveConfig> for StepSchedule {
    fn from(config: &MoveConfig) -> Self {
        Self {
            max_step: config.max_step,
            step_decay: config.step_decay,
        }
    }
}

/// A rectilinear block with ports on its perimeter.
#[derive(Clone, Debug)]
pub struct Block {
    id: BlockId,
    name: Ident,
    corners: Vec<Point>,
    edges: Vec<Edge>,
    slots: Vec<PortSlot>,
    slot_by_name: HashMap<Ident, usize>,
    overlap_cost: i64,
    schedule: StepSchedule,
    port_width: i64,
}

impl Block {
    /// Builds a block from a closed corner list, deriving its edges.
    ///
    /// Edge `i` runs from `corners[i]` to `corners[i + 1]`. Even edges must be
    /// vertical and odd edges horizontal, which is what footprint
    /// reconstruction assumes.
    pub fn from_outline(
        id: BlockId,
        name: Ident,
        corners: Vec<Point>,
        moves: &MoveConfig,
        port_width: i64,
    ) -> Result<Self, GeometryError> {
        let edges = derive_edges(&corners)?;
        Ok(Self {
            id,
            name,
            corners,
            edges,
            slots: Vec::new(),
            slot_by_name: HashMap::new(),
            overlap_cost: 0,
            schedule: StepSchedule::from(moves),
            port_width,
        })
    }

    /// Places a new port at edge 0, position 0 and returns its slot index.
    ///
    /// Slots are stable: ports are relocated, never removed.
    pub fn add_port(&mut self, name: Ident, length: i64) -> Result<usize, PortError> {
        if length <= 0 {
            return Err(PortError::NonPositiveLength(length));
        }
        if self.slot_by_name.contains_key(&name) {
            return Err(PortError::Duplicate);
        }
        let before = self.edge_overlap(0);
        let slot = self.slots.len();
        self.slots.push(PortSlot {
            port: Port::new(name, length, self.id),
            edge: 0,
            position: 0,
        });
        self.slot_by_name.insert(name, slot);
        self.overlap_cost += self.edge_overlap(0) - before;
        Ok(slot)
    }

    /// Block index.
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// Block name.
    pub fn name(&self) -> Ident {
        self.name
    }

    /// Closed outline, last corner equal to the first.
    pub fn corners(&self) -> &[Point] {
        &self.corners
    }

    /// Derived perimeter edges.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Every port assignment, indexed by slot.
    pub fn slots(&self) -> &[PortSlot] {
        &self.slots
    }

    /// The assignment in `slot`.
    ///
    /// # Panics
    ///
    /// Panics if the slot does not exist.
    pub fn slot(&self, slot: usize) -> &PortSlot {
        &self.slots[slot]
    }

    /// Looks up a port's slot by name.
    pub fn slot_of(&self, name: Ident) -> Option<usize> {
        self.slot_by_name.get(&name).copied()
    }

    /// Number of ports on the block.
    pub fn port_count(&self) -> usize {
        self.slots.len()
    }

    /// Incrementally maintained overlap cost.
    pub fn overlap_cost(&self) -> i64 {
        self.overlap_cost
    }

    /// Sum of pairwise overlaps of the ports on one edge, each pair once.
    pub fn edge_overlap(&self, edge: usize) -> i64 {
        let on_edge: Vec<(i64, i64)> = self
            .slots
            .iter()
            .filter(|s| s.edge == edge)
            .map(|s| (s.position, s.port.length))
            .collect();
        let mut total = 0;
        for (i, &a) in on_edge.iter().enumerate() {
            for &b in &on_edge[i + 1..] {
                total += interval_overlap(a, b);
            }
        }
        total
    }

    /// Overlap recomputed from scratch over every edge.
    ///
    /// Quadratic in the port count; the search hot path uses
    /// [`overlap_cost`](Self::overlap_cost) instead.
    pub fn total_overlap(&self) -> i64 {
        (0..self.edges.len()).map(|e| self.edge_overlap(e)).sum()
    }

    /// Moves the port in `slot` one step and returns the overlap delta.
    ///
    /// A move that would start before the edge wraps to the previous edge,
    /// flush against its end; a move that would run past the edge's end wraps
    /// to the next edge at position 0. Moving back with the opposite direction
    /// at the same `iteration` undoes a move that stayed on its edge.
    pub fn move_port(&mut self, slot: usize, direction: Direction, iteration: u64) -> i64 {
        let step = self.schedule.step(iteration);
        let edge_count = self.edges.len();
        let current = &self.slots[slot];
        let (edge, length) = (current.edge, current.port.length);
        let candidate = current.position + direction.sign() * step;

        let (new_edge, new_position) = if candidate < 0 {
            let previous = (edge + edge_count - 1) % edge_count;
            (previous, self.edges[previous].length - length)
        } else if candidate + length > self.edges[edge].length {
            ((edge + 1) % edge_count, 0)
        } else {
            (edge, candidate)
        };
        let crossed = new_edge != edge;

        let mut delta = -self.edge_overlap(edge);
        if crossed {
            delta -= self.edge_overlap(new_edge);
        }

        let moved = &mut self.slots[slot];
        moved.edge = new_edge;
        moved.position = new_position;

        delta += self.edge_overlap(edge);
        if crossed {
            delta += self.edge_overlap(new_edge);
        }
        self.overlap_cost += delta;
        delta
    }

    /// Axis-aligned footprint of the port in `slot`, in global coordinates.
    ///
    /// Even edges run along y and odd edges along x; the footprint extends
    /// `port_width` away from the edge.
    pub fn footprint(&self, slot: usize) -> Footprint {
        let PortSlot {
            port,
            edge,
            position,
        } = &self.slots[slot];
        let corner = self.corners[*edge];
        let (x, y) = (corner.x, corner.y);
        let (pos, len, width) = (*position, port.length, self.port_width);
        let forward = self.edges[*edge].sign > 0;

        let (start, end) = match (forward, edge % 2 == 0) {
            (true, true) => ((x, y + pos), (x + width, y + pos + len)),
            (true, false) => ((x + pos, y), (x + pos + len, y - width)),
            (false, true) => ((x, y - pos), (x - width, y - pos - len)),
            (false, false) => ((x - pos, y), (x - pos - len, y + width)),
        };
        Footprint {
            start: Point::new(start.0, start.1),
            end: Point::new(end.0, end.1),
        }
    }
}

/// Derives edge lengths and direction signs from a closed corner list.
pub fn derive_edges(corners: &[Point]) -> Result<Vec<Edge>, GeometryError> {
    if corners.first() != corners.last() || corners.is_empty() {
        return Err(GeometryError::NotClosed);
    }
    let edge_count = corners.len() - 1;
    if edge_count < 4 {
        return Err(GeometryError::TooFewEdges(edge_count));
    }

    let mut edges = Vec::with_capacity(edge_count);
    for (index, pair) in corners.windows(2).enumerate() {
        let (a, b) = (pair[0], pair[1]);
        let vertical = a.x == b.x;
        let horizontal = a.y == b.y;
        if vertical && horizontal {
            return Err(GeometryError::ZeroLength(index));
        }
        if !vertical && !horizontal {
            return Err(GeometryError::Diagonal(index));
        }
        if vertical != (index % 2 == 0) {
            return Err(GeometryError::WrongAxis(index));
        }
        let sign = if b.x > a.x || b.y > a.y { 1 } else { -1 };
        edges.push(Edge {
            start: a,
            length: a.manhattan(b),
            sign,
        });
    }
    Ok(edges)
}
