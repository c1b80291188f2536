//! Annealed rollouts.
//!
//! Follows the same Metropolis-style loop as the cell annealer: pick a random
//! move, price it incrementally, undo it when it is rejected. Acceptance is
//! deterministic here. An uphill move is undone only when its acceptance
//! probability falls below one half.

use crate::action::ActionSet;
use crate::configuration::Configuration;
use crate::connectivity::Connectivity;
use rand::Rng;

/// Probability below which an uphill move is undone.
const REJECT_BELOW: f64 = 0.5;

/// Trial budget and pricing for one rollout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnnealSchedule {
    /// Number of random moves to attempt.
    pub trials: u64,
    /// Annealing temperature.
    pub temperature: f64,
    /// Weight of one unit of overlap against one unit of wirelength.
    pub penalty: f64,
    /// Global iteration counter, fixed for the whole rollout.
    pub iteration: u64,
}

/// Outcome of one rollout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rollout {
    /// Fully recomputed total cost of the final scratch configuration.
    pub cost: f64,
    /// Depth reached: the start depth plus one per trial.
    pub depth: u64,
    /// Uphill moves that were kept.
    pub uphill_kept: u64,
    /// Uphill moves that were undone.
    pub rejected: u64,
}

/// Runs an annealed rollout on a detached clone of `start`.
///
/// `start` is never modified. With an empty action set no move is attempted
/// and the cost of `start` is returned.
pub fn anneal<R: Rng>(
    start: &Configuration,
    connectivity: &Connectivity,
    actions: &ActionSet,
    schedule: &AnnealSchedule,
    depth: u64,
    rng: &mut R,
) -> Rollout {
    let mut scratch = start.clone();
    let mut uphill_kept = 0;
    let mut rejected = 0;
    let mut performed = 0;

    for trial in 0..schedule.trials {
        let Some(action) = actions.choose(rng) else {
            break;
        };
        performed += 1;

        let wire_before = scratch.port_wirelength(connectivity, action.port);
        let overlap_delta = scratch.apply(action, schedule.iteration);
        let wire_after = scratch.port_wirelength(connectivity, action.port);

        let delta = (wire_after - wire_before) + schedule.penalty * overlap_delta as f64;
        if delta <= 0.0 {
            continue;
        }

        let p = (-delta * trial as f64 / schedule.temperature).exp();
        if p < REJECT_BELOW {
            scratch.apply(action.reversed(), schedule.iteration);
            rejected += 1;
        } else {
            uphill_kept += 1;
        }
    }

    Rollout {
        cost: scratch.total_cost(connectivity, schedule.penalty),
        depth: depth + performed,
        uphill_kept,
        rejected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;
    use crate::connectivity::PortRef;
    use crate::geometry::Point;
    use crate::ids::BlockId;
    use edgeport_common::Ident;
    use edgeport_config::MoveConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn square(id: u32, origin: Point, side: i64) -> Block {
        let corners = vec![
            origin,
            Point::new(origin.x, origin.y + side),
            Point::new(origin.x + side, origin.y + side),
            Point::new(origin.x + side, origin.y),
            origin,
        ];
        Block::from_outline(
            BlockId::from_raw(id),
            Ident::from_raw(id),
            corners,
            &MoveConfig::default(),
            10,
        )
        .unwrap()
    }

    /// Two ports of length 5 on one block, both at the origin, wired together.
    fn stacked_pair() -> (Configuration, Connectivity) {
        let mut block = square(0, Point::new(0, 0), 100);
        block.add_port(Ident::from_raw(10), 5).unwrap();
        block.add_port(Ident::from_raw(11), 5).unwrap();
        let mut connectivity = Connectivity::new();
        connectivity.connect(
            PortRef::new(BlockId::from_raw(0), 0),
            PortRef::new(BlockId::from_raw(0), 1),
            1,
        );
        (Configuration::new(vec![block]), connectivity)
    }

    fn schedule(trials: u64) -> AnnealSchedule {
        AnnealSchedule {
            trials,
            temperature: 1000.0,
            penalty: 1000.0,
            iteration: 1,
        }
    }

    #[test]
    fn start_configuration_is_untouched() {
        let (start, connectivity) = stacked_pair();
        let actions = ActionSet::from_configuration(&start);
        let before = start.total_cost(&connectivity, 1000.0);
        let mut rng = StdRng::seed_from_u64(7);
        anneal(&start, &connectivity, &actions, &schedule(50), 1, &mut rng);
        assert_eq!(start.total_cost(&connectivity, 1000.0), before);
        assert_eq!(start.block(BlockId::from_raw(0)).slot(0).position, 0);
    }

    #[test]
    fn depth_counts_trials() {
        let (start, connectivity) = stacked_pair();
        let actions = ActionSet::from_configuration(&start);
        let mut rng = StdRng::seed_from_u64(1);
        let rollout = anneal(&start, &connectivity, &actions, &schedule(25), 3, &mut rng);
        assert_eq!(rollout.depth, 28);
    }

    #[test]
    fn rollout_leaves_stacked_overlap() {
        let (start, connectivity) = stacked_pair();
        let actions = ActionSet::from_configuration(&start);
        let initial = start.total_cost(&connectivity, 1000.0);
        let mut rng = StdRng::seed_from_u64(3);
        let rollout = anneal(&start, &connectivity, &actions, &schedule(40), 1, &mut rng);
        // The first move always separates the stacked ports.
        assert!(rollout.cost < initial);
    }

    #[test]
    fn same_seed_same_rollout() {
        let (start, connectivity) = stacked_pair();
        let actions = ActionSet::from_configuration(&start);
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let first = anneal(&start, &connectivity, &actions, &schedule(60), 1, &mut a);
        let second = anneal(&start, &connectivity, &actions, &schedule(60), 1, &mut b);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_action_set_returns_start_cost() {
        let start = Configuration::new(vec![square(0, Point::new(0, 0), 50)]);
        let connectivity = Connectivity::new();
        let actions = ActionSet::from_configuration(&start);
        let mut rng = StdRng::seed_from_u64(0);
        let rollout = anneal(&start, &connectivity, &actions, &schedule(10), 2, &mut rng);
        assert_eq!(rollout.cost, 0.0);
        assert_eq!(rollout.depth, 2);
        assert_eq!(rollout.rejected + rollout.uphill_kept, 0);
    }
}
