//! Configuration types deserialized from `edgeport.toml`.
//!
//! Every section and field is optional; missing values take the defaults
//! below.

use serde::Deserialize;

/// The top-level placer configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlacerConfig {
    /// Tree search and rollout settings.
    #[serde(default)]
    pub search: SearchConfig,
    /// Port move step schedule.
    #[serde(default)]
    pub moves: MoveConfig,
    /// Port footprint geometry.
    #[serde(default)]
    pub port: PortConfig,
}

/// Settings of the Monte Carlo tree search.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of top-level select/rollout/backpropagate iterations.
    pub iterations: u32,
    /// Maximum number of descents the tree policy makes per iteration.
    pub max_depth: u32,
    /// Exploration constant weighting the UCB term of the search value.
    pub exploration: f64,
    /// Weight of the overlap cost relative to wirelength.
    pub penalty: f64,
    /// Annealing trials per tree level reached by the tree policy.
    pub rollout_trials: u32,
    /// Annealing temperature per tree level reached by the tree policy.
    pub rollout_temperature: f64,
    /// Seed for rollout randomness. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            max_depth: 1000,
            exploration: 30.0,
            penalty: 1.0,
            rollout_trials: 1000,
            rollout_temperature: 1000.0,
            seed: None,
        }
    }
}

/// Step schedule of a single port move.
///
/// The step at global iteration `t` is `max(1, floor(max_step - step_decay^t))`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MoveConfig {
    /// Largest step a port can take along its edge.
    pub max_step: i64,
    /// Base of the exponential that shrinks the step as the search advances.
    pub step_decay: f64,
}

impl Default for MoveConfig {
    fn default() -> Self {
        Self {
            max_step: 10,
            step_decay: 1.0003,
        }
    }
}

/// Port footprint geometry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PortConfig {
    /// Footprint extent perpendicular to the hosting edge.
    pub width: i64,
}

impl Default for PortConfig {
    fn default() -> Self {
        Self { width: 10 }
    }
}
