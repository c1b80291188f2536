//! Monte Carlo tree search with annealed rollouts.

pub mod engine;
pub mod rollout;
pub mod tree;

pub use engine::{SearchEngine, SearchProgress, SearchReport};
pub use rollout::{anneal, AnnealSchedule, Rollout};
pub use tree::{SearchNode, SearchTree, UNVISITED_EPSILON};
