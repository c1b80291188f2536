//! The global action set: one unit move per port and direction.
//!
//! The set is built once from the root configuration and its order is fixed:
//! expansion creates a node's Nth child with the Nth action.

use crate::configuration::Configuration;
use crate::connectivity::PortRef;
use rand::Rng;

/// Direction of a port move along its edge.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    /// Toward the edge's end (`+1`).
    Forward,
    /// Toward the edge's start (`-1`).
    Backward,
}

impl Direction {
    /// `+1` or `-1`.
    pub fn sign(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Move one port one step in one direction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Action {
    /// The port to move.
    pub port: PortRef,
    /// Which way to move it.
    pub direction: Direction,
}

impl Action {
    /// The same port moved the other way.
    pub fn reversed(self) -> Self {
        Self {
            port: self.port,
            direction: self.direction.reversed(),
        }
    }
}

/// Fixed, ordered list of every action available to the search.
#[derive(Clone, Debug, Default)]
pub struct ActionSet {
    actions: Vec<Action>,
}

impl ActionSet {
    /// Enumerates blocks, then ports within each block, adding the forward
    /// and then the backward move of each port.
    pub fn from_configuration(configuration: &Configuration) -> Self {
        let mut actions = Vec::new();
        for block in configuration.blocks() {
            for slot in 0..block.port_count() {
                let port = PortRef::new(block.id(), slot as u32);
                actions.push(Action {
                    port,
                    direction: Direction::Forward,
                });
                actions.push(Action {
                    port,
                    direction: Direction::Backward,
                });
            }
        }
        Self { actions }
    }

    /// Number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns `true` if there are no ports to move.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The action at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn get(&self, index: usize) -> Action {
        self.actions[index]
    }

    /// A uniformly random action, or `None` if the set is empty.
    pub fn choose<R: Rng>(&self, rng: &mut R) -> Option<Action> {
        if self.actions.is_empty() {
            return None;
        }
        Some(self.actions[rng.gen_range(0..self.actions.len())])
    }

    /// Iterates actions in their fixed order.
    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;
    use crate::geometry::Point;
    use crate::ids::BlockId;
    use edgeport_common::Ident;
    use edgeport_config::MoveConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn square(id: u32, ports: u32) -> Block {
        let corners = vec![
            Point::new(0, 0),
            Point::new(0, 10),
            Point::new(10, 10),
            Point::new(10, 0),
            Point::new(0, 0),
        ];
        let mut block = Block::from_outline(
            BlockId::from_raw(id),
            Ident::from_raw(id),
            corners,
            &MoveConfig::default(),
            10,
        )
        .unwrap();
        for p in 0..ports {
            block.add_port(Ident::from_raw(100 + p), 2).unwrap();
        }
        block
    }

    #[test]
    fn two_actions_per_port_in_block_then_port_order() {
        let config = Configuration::new(vec![square(0, 2), square(1, 1)]);
        let set = ActionSet::from_configuration(&config);
        assert_eq!(set.len(), 6);

        let expected = [
            (0, 0, Direction::Forward),
            (0, 0, Direction::Backward),
            (0, 1, Direction::Forward),
            (0, 1, Direction::Backward),
            (1, 0, Direction::Forward),
            (1, 0, Direction::Backward),
        ];
        for (action, (block, slot, direction)) in set.iter().zip(expected) {
            assert_eq!(action.port, PortRef::new(BlockId::from_raw(block), slot));
            assert_eq!(action.direction, direction);
        }
    }

    #[test]
    fn reversed_flips_direction_only() {
        let action = Action {
            port: PortRef::new(BlockId::from_raw(3), 1),
            direction: Direction::Forward,
        };
        let back = action.reversed();
        assert_eq!(back.port, action.port);
        assert_eq!(back.direction, Direction::Backward);
        assert_eq!(back.reversed(), action);
        assert_eq!(Direction::Backward.sign(), -1);
    }

    #[test]
    fn choose_from_empty_set() {
        let set = ActionSet::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(set.is_empty());
        assert!(set.choose(&mut rng).is_none());
    }

    #[test]
    fn choose_stays_in_set() {
        let config = Configuration::new(vec![square(0, 3)]);
        let set = ActionSet::from_configuration(&config);
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            let action = set.choose(&mut rng).unwrap();
            assert!(set.iter().any(|a| *a == action));
        }
    }
}
